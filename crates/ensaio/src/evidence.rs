//! Screenshot evidence.
//!
//! Evidence lands under `<base>/evidencias/screenshots/{sucesso,erro}`,
//! one PNG per scenario, named `<scenario>_<dd-MM-yyyy_HH-mm-ss>.png`
//! with spaces turned into underscores. Full-page capture scrolls the
//! viewport down the document and stitches the tiles vertically.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{imageops, ImageFormat, RgbaImage};

use crate::backend::Backend;
use crate::error::{timestamp, EnsaioError, EnsaioResult};

/// Scenario outcome, selects the evidence subfolder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Scenario passed; evidence goes to `sucesso/`.
    Success,
    /// Scenario failed; evidence goes to `erro/`.
    Error,
}

impl Outcome {
    /// Subfolder name.
    #[must_use]
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Success => "sucesso",
            Self::Error => "erro",
        }
    }
}

/// `<base>/evidencias/screenshots/<outcome>`.
#[must_use]
pub fn outcome_dir(base: &Path, outcome: Outcome) -> PathBuf {
    base.join("evidencias")
        .join("screenshots")
        .join(outcome.dir_name())
}

/// Scenario name made filesystem-friendly: whitespace and path
/// separators become underscores.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Create the evidence tree and empty both outcome folders from
/// previous runs. Called once at suite startup.
pub fn prepare_evidence_dirs(base: &Path) -> EnsaioResult<()> {
    for outcome in [Outcome::Success, Outcome::Error] {
        let dir = outcome_dir(base, outcome);
        std::fs::create_dir_all(&dir)?;
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(path)?;
            }
        }
    }
    Ok(())
}

/// Write `png` into the outcome folder and return the full path.
pub fn save_screenshot(
    base: &Path,
    outcome: Outcome,
    scenario_name: &str,
    png: &[u8],
) -> EnsaioResult<PathBuf> {
    let dir = outcome_dir(base, outcome);
    std::fs::create_dir_all(&dir)?;
    let file = format!("{}_{}.png", sanitize_name(scenario_name), timestamp());
    let path = dir.join(file);
    std::fs::write(&path, png)?;
    tracing::info!(path = %path.display(), "evidence saved");
    Ok(path)
}

/// Capture the whole page as one PNG.
///
/// Returns to the top-level document first, then scrolls one viewport
/// at a time and stitches the tiles. Pages that fit in the viewport
/// come back as a single untouched screenshot.
pub async fn capture_full_page<B: Backend>(backend: &mut B) -> EnsaioResult<Vec<u8>> {
    backend
        .enter_default_frame()
        .await
        .map_err(EnsaioError::from_driver)?;
    let total = script_u32(backend, "return document.body.scrollHeight;").await?;
    let viewport = script_u32(backend, "return window.innerHeight;").await?;
    if viewport == 0 || total <= viewport {
        return backend
            .screenshot_png()
            .await
            .map_err(EnsaioError::from_driver);
    }

    let mut tiles = Vec::new();
    let mut y = 0u32;
    while y < total {
        let offset = y.min(total - viewport);
        let script = format!("window.scrollTo(0, {offset});");
        backend
            .execute(&script)
            .await
            .map_err(EnsaioError::from_driver)?;
        let png = backend
            .screenshot_png()
            .await
            .map_err(EnsaioError::from_driver)?;
        let tile = image::load_from_memory_with_format(&png, ImageFormat::Png)?.to_rgba8();
        tiles.push((offset, tile));
        y += viewport;
    }
    backend
        .execute("window.scrollTo(0, 0);")
        .await
        .map_err(EnsaioError::from_driver)?;
    stitch(&tiles, total)
}

/// Tile viewport captures vertically onto one canvas and encode PNG.
/// Tiles are `(document y-offset, image)`; overlapping tiles simply
/// overwrite, so the clamped last tile needs no special casing.
fn stitch(tiles: &[(u32, RgbaImage)], total_height: u32) -> EnsaioResult<Vec<u8>> {
    let width = tiles.first().map_or(0, |(_, t)| t.width());
    let mut canvas = RgbaImage::new(width, total_height);
    for (offset, tile) in tiles {
        imageops::replace(&mut canvas, tile, 0, i64::from(*offset));
    }
    let mut out = Cursor::new(Vec::new());
    canvas.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

// scrollHeight can come back fractional under zoom or non-integral
// device pixel ratios, so round rather than requiring an integer.
async fn script_u32<B: Backend>(backend: &mut B, script: &str) -> EnsaioResult<u32> {
    let value = backend
        .execute(script)
        .await
        .map_err(EnsaioError::from_driver)?;
    Ok(value.as_f64().map_or(0, |v| v.round().max(0.0) as u32))
}

#[cfg(test)]
mod evidence_tests {
    use super::*;
    use image::Rgba;

    fn solid_tile(width: u32, height: u32, shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255]))
    }

    #[test]
    fn sanitize_replaces_whitespace() {
        assert_eq!(
            sanitize_name("Comprar um produto no site"),
            "Comprar_um_produto_no_site"
        );
        assert_eq!(sanitize_name("a/b\\c"), "a_b_c");
    }

    #[test]
    fn outcome_dirs_follow_the_fixed_layout() {
        let dir = outcome_dir(Path::new("target"), Outcome::Error);
        assert_eq!(dir, PathBuf::from("target/evidencias/screenshots/erro"));
    }

    #[test]
    fn stitch_tiles_in_document_order() {
        let tiles = vec![
            (0, solid_tile(4, 10, 10)),
            (10, solid_tile(4, 10, 20)),
            (15, solid_tile(4, 10, 30)),
        ];
        let png = stitch(&tiles, 25).unwrap();
        let canvas = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(canvas.dimensions(), (4, 25));
        assert_eq!(canvas.get_pixel(0, 5).0[0], 10);
        assert_eq!(canvas.get_pixel(0, 12).0[0], 20);
        // clamped last tile overwrites the overlap
        assert_eq!(canvas.get_pixel(0, 24).0[0], 30);
    }

    #[test]
    fn prepare_creates_and_empties_folders() {
        let base = tempfile::tempdir().unwrap();
        let stale = outcome_dir(base.path(), Outcome::Success).join("old.png");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, b"stale").unwrap();

        prepare_evidence_dirs(base.path()).unwrap();
        assert!(!stale.exists());
        assert!(outcome_dir(base.path(), Outcome::Error).is_dir());
    }

    #[test]
    fn saved_screenshot_lands_in_the_outcome_folder() {
        let base = tempfile::tempdir().unwrap();
        let path =
            save_screenshot(base.path(), Outcome::Error, "Comprar um produto", b"png").unwrap();
        assert!(path.starts_with(outcome_dir(base.path(), Outcome::Error)));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Comprar_um_produto_"));
        assert!(name.ends_with(".png"));
    }

    #[tokio::test]
    async fn short_page_is_a_single_capture() {
        use crate::backend::MockBackend;
        let mut mock = MockBackend::new();
        mock.script_results = vec![serde_json::json!(600), serde_json::json!(800)];
        mock.screenshot = b"raw-png".to_vec();
        let png = capture_full_page(&mut mock).await.unwrap();
        assert_eq!(png, b"raw-png");
        assert!(mock.was_called("enter_default_frame"));
    }

    #[tokio::test]
    async fn fractional_scroll_height_still_stitches() {
        use crate::backend::MockBackend;
        let mut mock = MockBackend::new();
        // zoomed pages report fractional document heights
        mock.script_results = vec![serde_json::json!(19.5), serde_json::json!(10)];
        let tile = solid_tile(4, 10, 50);
        let mut bytes = Cursor::new(Vec::new());
        tile.write_to(&mut bytes, ImageFormat::Png).unwrap();
        mock.screenshot = bytes.into_inner();

        let png = capture_full_page(&mut mock).await.unwrap();
        let canvas = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(canvas.dimensions(), (4, 20));
    }

    #[tokio::test]
    async fn tall_page_scrolls_and_stitches() {
        use crate::backend::MockBackend;
        let mut mock = MockBackend::new();
        mock.script_results = vec![serde_json::json!(20), serde_json::json!(10)];
        let tile = solid_tile(4, 10, 99);
        let mut bytes = Cursor::new(Vec::new());
        tile.write_to(&mut bytes, ImageFormat::Png).unwrap();
        mock.screenshot = bytes.into_inner();

        let png = capture_full_page(&mut mock).await.unwrap();
        let canvas = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(canvas.dimensions(), (4, 20));
        let scrolls = mock
            .calls
            .iter()
            .filter(|c| c.starts_with("execute(window.scrollTo"))
            .count();
        // two tile scrolls plus the final scroll back to the top
        assert_eq!(scrolls, 3);
    }
}
