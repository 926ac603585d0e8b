use scatterview::layout::{DeviceCoordinates, DevicePoint, LinearScale};
use scatterview::render::export::{default_export_name, frame_to_image, save_png};
use scatterview::{PointProgram, PointRenderer, Rgba, ViewTransform};

fn rendered() -> PointRenderer {
    let program = PointProgram::compile(6.0, 1.0).unwrap();
    let mut r = PointRenderer::new(40, 30, program, Rgba::rgb(250, 250, 250)).unwrap();
    let coords = DeviceCoordinates {
        points: vec![DevicePoint {
            index: 0,
            px: 10.0,
            py: 10.0,
        }],
        x_scale: LinearScale::padded(0.0, 1.0, 0.0, 40.0),
        y_scale: LinearScale::padded(0.0, 1.0, 30.0, 0.0),
        width: 40.0,
        height: 30.0,
        excluded: Vec::new(),
    };
    r.render(&coords, &[Rgba::rgb(0, 0, 200)], &ViewTransform::IDENTITY)
        .unwrap();
    r
}

#[test]
fn frame_converts_to_image_of_same_size() {
    let r = rendered();
    let img = frame_to_image(r.frame());
    assert_eq!(img.dimensions(), (40, 30));
    assert_eq!(img.get_pixel(10, 10).0, [0, 0, 200, 255]);
    assert_eq!(img.get_pixel(35, 25).0, [250, 250, 250, 255]);
}

#[test]
fn png_export_writes_readable_file() {
    let r = rendered();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    save_png(r.frame(), &path).unwrap();

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (40, 30));
    assert_eq!(back.get_pixel(10, 10).0, [0, 0, 200, 255]);
}

#[test]
fn export_name_is_timestamped_png() {
    let name = default_export_name();
    assert!(name.starts_with("scatter_"));
    assert!(name.ends_with(".png"));
    assert_eq!(name.len(), "scatter_YYYYmmdd_HHMMSS.png".len());
}
