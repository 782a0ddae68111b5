// Purpose: Rasterize canvases and charts; check PNG framing, pixel layout and a few known pixels.

use axes_core::{AxesCanvas, Chart, ChartConfig, Line, LineSeries, Point, Rect, Size, Theme};
use axes_render_skia::SkiaRasterizer;

fn pixel(frame: &axes_render_skia::RgbaFrame, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [frame.pixels[i], frame.pixels[i + 1], frame.pixels[i + 2], frame.pixels[i + 3]]
}

#[test]
fn blank_canvas_is_background() {
    let canvas = AxesCanvas::new(Size::new(40.0, 30.0)).unwrap();
    let frame = SkiaRasterizer::new(Theme::light()).render_rgba8(&canvas).unwrap();
    assert_eq!((frame.width, frame.height), (40, 30));
    assert_eq!(frame.pixels.len(), 40 * 30 * 4);
    assert_eq!(pixel(&frame, 0, 0), [0xfa, 0xfa, 0xfc, 0xff]);
    assert_eq!(pixel(&frame, 39, 29), [0xfa, 0xfa, 0xfc, 0xff]);
}

#[test]
fn data_space_line_lands_on_mapped_pixels() {
    let mut canvas = AxesCanvas::new(Size::new(100.0, 100.0)).unwrap();
    canvas.set_window(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0)).unwrap();
    canvas.attach(Line::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0)).coloured("#ff0000", 4.0));
    let frame = SkiaRasterizer::new(Theme::light()).render_rgba8(&canvas).unwrap();
    assert_eq!(pixel(&frame, 50, 50), [255, 0, 0, 255]);
    // Far from the line stays background.
    assert_eq!(pixel(&frame, 50, 10), [0xfa, 0xfa, 0xfc, 0xff]);
}

#[test]
fn chart_png_decodes() {
    let mut chart = Chart::new(ChartConfig::default().with_labels("x", "y"));
    chart.add_series(LineSeries::numeric("a", vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)])).unwrap();
    chart.add_series(LineSeries::numeric("b", vec![(0.0, 2.0), (2.0, 0.5)])).unwrap();
    let canvas = chart.layout().unwrap();
    let rasterizer = SkiaRasterizer::for_chart(&chart).without_labels();
    let bytes = rasterizer.render_png_bytes(&canvas).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (800, 500));

    let out = std::path::PathBuf::from("target/test_out/chart.png");
    rasterizer.render_to_png(&canvas, &out).unwrap();
    assert!(out.exists());
}
