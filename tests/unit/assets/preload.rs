use std::io::Cursor;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_preload").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("img")).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 40, 90, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="24.5"><rect width="40" height="24" fill="red"/></svg>"#;

#[test]
fn kind_follows_extension() {
    assert_eq!(AssetKind::from_url("img/map.SVG"), AssetKind::Svg);
    assert_eq!(AssetKind::from_url("img/lucia.png"), AssetKind::Raster);
    assert_eq!(AssetKind::from_url("noext"), AssetKind::Raster);
}

#[test]
fn site_relative_urls_resolve_under_root() {
    let root = Path::new("public");
    assert_eq!(
        resolve_asset_path(root, "/img/a.png"),
        PathBuf::from("public/img/a.png")
    );
    assert_eq!(
        resolve_asset_path(root, "img/a.png"),
        PathBuf::from("public/img/a.png")
    );
}

#[test]
fn svg_size_rounds_up() {
    assert_eq!(svg_dimensions(SVG, None).unwrap(), (40, 25));
    assert!(svg_dimensions(b"<svg", None).is_err());
}

#[test]
fn raster_decode_reports_dimensions() {
    let root = scratch("raster");
    write_png(&root.join("img/a.png"), 7, 3);
    let bytes = std::fs::read(root.join("img/a.png")).unwrap();
    assert_eq!(raster_dimensions(&bytes).unwrap(), (7, 3));
    assert!(raster_dimensions(b"not an image").is_err());
}

#[test]
fn preload_sorts_outcomes_and_never_fails() {
    let root = scratch("mixed");
    write_png(&root.join("img/a.png"), 4, 2);
    std::fs::write(root.join("img/b.svg"), SVG).unwrap();
    std::fs::write(root.join("img/broken.png"), b"garbage").unwrap();

    let urls = [
        "img/a.png",
        "https://example.invalid/c.png",
        "/img/b.svg",
        "img/broken.png",
        "img/missing.jpg",
    ];
    let report = preload_assets(&root, &urls);

    assert_eq!(report.total(), 5);
    assert!(!report.is_complete());
    assert_eq!(
        report.loaded,
        vec![
            LoadedAsset {
                url: "img/a.png".to_owned(),
                kind: AssetKind::Raster,
                width: 4,
                height: 2,
            },
            LoadedAsset {
                url: "/img/b.svg".to_owned(),
                kind: AssetKind::Svg,
                width: 40,
                height: 25,
            },
        ]
    );
    assert_eq!(report.skipped, vec!["https://example.invalid/c.png".to_owned()]);
    let failed: Vec<_> = report.failed.iter().map(|f| f.url.as_str()).collect();
    assert_eq!(failed, ["img/broken.png", "img/missing.jpg"]);
    assert!(report.failed[1].reason.contains("read asset"));
}

#[test]
fn empty_list_is_complete() {
    let report = preload_assets::<&str>(Path::new("."), &[]);
    assert!(report.is_complete());
    assert_eq!(report.total(), 0);
}
