use std::cell::RefCell;
use std::rc::Rc;

use easel_core::{
    Attributes, Canvas, CanvasConfig, CanvasError, ExtensionArgs, ExtensionValue, Exporter, Host,
};
use easel_paint::{Color, PaintCommand};

/// Writes one byte per recorded command, per layer
struct CommandCountExporter;

impl Exporter for CommandCountExporter {
    fn export(&self, canvas: &Canvas) -> easel_core::Result<Vec<u8>> {
        canvas
            .layers()
            .map(|layer| {
                let commands = layer
                    .context()
                    .recorded()
                    .ok_or_else(|| CanvasError::Export("layer does not record".into()))?;
                u8::try_from(commands.len()).map_err(|e| CanvasError::Export(e.to_string()))
            })
            .collect()
    }
}

#[derive(Default)]
struct MemoryHost {
    attached: Vec<Vec<u8>>,
}

impl Host for MemoryHost {
    fn attach(&mut self, artifact: Vec<u8>) -> easel_core::Result<()> {
        self.attached.push(artifact);
        Ok(())
    }
}

fn star_extension(canvas: &mut Canvas, args: &ExtensionArgs) -> easel_core::Result<ExtensionValue> {
    let layer = args.layer(0)?;
    let radius = args.number(1)?;
    let color = args.color(2)?;

    let points = (0..10).map(|i| {
        let angle = i as f32 * std::f32::consts::PI / 5.0;
        let r = if i % 2 == 0 { radius } else { radius / 2.0 };
        [r * angle.cos(), r * angle.sin()]
    });
    let id = canvas.polygon(layer, Attributes::new().with_points(points).with_fill(color))?;
    Ok(ExtensionValue::Element(id))
}

#[test]
fn extension_creates_elements() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    let layer = canvas.new_layer();
    canvas.register("star", star_extension);

    let args = ExtensionArgs::new().with(layer).with(10.0_f32).with("#00ff00");
    let value = canvas.invoke("star", &args).unwrap();

    let ExtensionValue::Element(id) = value else {
        panic!("expected an element, got {value:?}");
    };
    assert_eq!(canvas.element(id).unwrap().attributes().points.len(), 10);

    canvas.render().unwrap();
    let commands = canvas.layer(layer).unwrap().context().recorded().unwrap();
    assert!(matches!(
        commands,
        [PaintCommand::FillPath { style, .. }] if style.color == Color::GREEN
    ));
}

#[test]
fn unknown_extension_is_an_error() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    let err = canvas.invoke("missing", &ExtensionArgs::new()).unwrap_err();
    assert!(matches!(err, CanvasError::UnknownExtension(name) if name == "missing"));
}

#[test]
fn extension_argument_errors_propagate() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    canvas.register("star", star_extension);

    let err = canvas
        .invoke("star", &ExtensionArgs::new().with("not a layer"))
        .unwrap_err();
    assert!(matches!(err, CanvasError::Extension(_)));
}

#[test]
fn reregistering_replaces_the_extension() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    canvas.register("answer", |_, _| Ok(ExtensionValue::Number(1.0)));
    canvas.register("answer", |_, _| Ok(ExtensionValue::Number(42.0)));

    assert_eq!(canvas.extensions().len(), 1);
    assert_eq!(
        canvas.invoke("answer", &ExtensionArgs::new()).unwrap(),
        ExtensionValue::Number(42.0)
    );
}

#[test]
fn extensions_can_reenter_the_canvas() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    canvas.register("count", move |_, _| {
        *counter.borrow_mut() += 1;
        Ok(ExtensionValue::None)
    });
    canvas.register("twice", |canvas, args| {
        canvas.invoke("count", args)?;
        canvas.invoke("count", args)
    });

    canvas.invoke("twice", &ExtensionArgs::new()).unwrap();
    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn convert_to_image_tears_down_the_canvas() {
    let mut canvas = Canvas::recording(CanvasConfig::default());
    let background = canvas.new_layer();
    let foreground = canvas.new_layer();
    canvas
        .rect(background, Attributes::new().with_size(10.0, 10.0))
        .unwrap();
    let circle = canvas
        .circle(
            foreground,
            Attributes::new()
                .with_radius(4.0)
                .with_fill(Color::BLUE)
                .with_stroke(Color::BLACK, 1.0),
        )
        .unwrap();
    canvas.render().unwrap();

    let mut host = MemoryHost::default();
    canvas
        .convert_to_image(&CommandCountExporter, &mut host)
        .unwrap();

    assert_eq!(host.attached, vec![vec![1, 2]]);
    assert_eq!(canvas.layers().count(), 0);
    assert!(!canvas.contains(circle));
}
