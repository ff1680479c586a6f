//! Build pipeline
//!
//! extraction -> packing -> resolution -> serialization, run once to
//! completion. Fatal errors stop the run before anything is written;
//! warnings are collected into the summary.

use crate::atlas::{atlas_checksum, pack_atlas, utilization};
use crate::config::{validate_config, BuildConfig};
use crate::error::{BuildResult, BuildWarning};
use crate::output::{validate_listing_names, write_outputs, WrittenOutputs};
use crate::registry::{default_catalog, load_catalog, resolve_catalog, Catalog};
use crate::source::{extract_textures, ExtractedTextures};
use std::fmt;

/// End-of-run report
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub placed: usize,
    pub dropped: usize,
    pub entities: usize,
    pub missing: usize,
    pub utilization: f32,
    pub checksum: u32,
    pub outputs: WrittenOutputs,
    pub warnings: Vec<BuildWarning>,
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "placed {} textures ({} dropped, {} skipped), resolved {} entities ({} missing textures), atlas {:.1}% full, crc32 {:08x}",
            self.placed,
            self.dropped,
            self.skipped,
            self.entities,
            self.missing,
            self.utilization,
            self.checksum
        )
    }
}

/// Catalog named by the config, or the built-in one
pub fn load_configured_catalog(config: &BuildConfig) -> BuildResult<Catalog> {
    match &config.catalog {
        Some(path) => load_catalog(path),
        None => default_catalog(),
    }
}

/// Run the whole build from the configured source
pub fn run_build(config: &BuildConfig) -> BuildResult<BuildSummary> {
    validate_config(config)?;
    let catalog = load_configured_catalog(config)?;
    validate_listing_names(&catalog.entries, config.identifier_format)?;
    let extracted = extract_textures(&config.source, &config.texture_prefix, config.cell_size)?;
    build_from_textures(extracted, &catalog, config)
}

/// Pack, resolve and write already extracted textures
pub fn build_from_textures(
    extracted: ExtractedTextures,
    catalog: &Catalog,
    config: &BuildConfig,
) -> BuildResult<BuildSummary> {
    validate_config(config)?;
    validate_listing_names(&catalog.entries, config.identifier_format)?;

    let ExtractedTextures {
        images,
        warnings: mut all_warnings,
    } = extracted;
    let extracted_count = images.len();
    let skipped = all_warnings.len();

    let packed = pack_atlas(images, config.canvas_size, config.cell_size)?;
    let resolved = resolve_catalog(catalog, &packed.mapping);

    let checksum = atlas_checksum(&packed.canvas);
    let fill = utilization(&packed);
    let placed = packed.report.placed;
    let dropped = packed.report.dropped.len();
    all_warnings.extend(packed.report.warnings.iter().cloned());
    all_warnings.extend(resolved.warnings.iter().cloned());

    let outputs = write_outputs(
        &config.output_dir,
        &config.files,
        packed,
        &resolved.entities,
        &config.identifier_listing(),
    )?;

    let summary = BuildSummary {
        extracted: extracted_count,
        skipped,
        placed,
        dropped,
        entities: resolved.entities.len(),
        missing: resolved.warnings.len(),
        utilization: fill,
        checksum,
        outputs,
        warnings: all_warnings,
    };
    log::info!("Done: {}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::output::IdentifierFormat;
    use crate::registry::parse_catalog;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    const TEST_CATALOG: &str = r#"
        [exclusions]
        non_opaque = ["Air"]
        non_solid = ["Air"]

        [[entity]]
        name = "Air"

        [[entity]]
        name = "Stone"
        all = "stone"

        [[entity]]
        name = "Grass"
        faces = { top = "grass_block_top", bottom = "dirt", side = "grass_block_side" }
    "#;

    fn write_texture(root: &Path, name: &str, color: [u8; 4]) {
        let dir = root.join("block");
        std::fs::create_dir_all(&dir).expect("create dirs");
        RgbaImage::from_pixel(16, 16, Rgba(color))
            .save_with_format(dir.join(format!("{}.png", name)), ImageFormat::Png)
            .expect("save texture");
    }

    fn create_test_config(root: &Path, out: &str) -> BuildConfig {
        BuildConfig {
            source: root.join("src"),
            output_dir: root.join(out),
            canvas_size: 64,
            texture_prefix: "block/".to_string(),
            ..Default::default()
        }
    }

    fn create_test_source(root: &Path) {
        let src = root.join("src");
        write_texture(&src, "stone", [128, 128, 128, 255]);
        write_texture(&src, "dirt", [100, 70, 30, 255]);
        write_texture(&src, "grass_block_side", [90, 140, 40, 255]);
    }

    #[test]
    fn test_run_build_end_to_end() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        create_test_source(dir.path());
        let catalog_path = dir.path().join("catalog.toml");
        std::fs::write(&catalog_path, TEST_CATALOG).expect("write catalog");

        let config = BuildConfig {
            catalog: Some(catalog_path),
            ..create_test_config(dir.path(), "out")
        };
        let summary = run_build(&config).expect("build");

        assert_eq!(summary.extracted, 3);
        assert_eq!(summary.placed, 3);
        assert_eq!(summary.dropped, 0);
        assert_eq!(summary.entities, 3);
        assert_eq!(summary.missing, 1);
        assert!(summary.outputs.atlas.is_file());

        let registry: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&summary.outputs.registry).expect("read registry"),
        )
        .expect("parse registry");
        let grass = &registry["blocks"][2];
        assert_eq!(grass["id"], 2);
        assert!(grass["textures"].get("top").is_none());
        assert_eq!(grass["textures"]["side"]["name"], "grass_block_side");
    }

    #[test]
    fn test_runs_are_reproducible() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        create_test_source(dir.path());

        let first = run_build(&create_test_config(dir.path(), "first")).expect("first build");
        let second = run_build(&create_test_config(dir.path(), "second")).expect("second build");

        assert_eq!(first.checksum, second.checksum);
        for (a, b) in [
            (&first.outputs.atlas, &second.outputs.atlas),
            (&first.outputs.mapping, &second.outputs.mapping),
            (&first.outputs.registry, &second.outputs.registry),
            (&first.outputs.identifiers, &second.outputs.identifiers),
        ] {
            assert_eq!(std::fs::read(a).expect("read"), std::fs::read(b).expect("read"));
        }
    }

    #[test]
    fn test_empty_source_writes_nothing() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        std::fs::create_dir_all(dir.path().join("src")).expect("create src");
        let config = create_test_config(dir.path(), "out");

        assert!(matches!(run_build(&config), Err(BuildError::EmptyInput)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_bad_canvas_fails_before_extraction() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        let config = BuildConfig {
            canvas_size: 48,
            source: dir.path().join("does-not-exist.zip"),
            ..Default::default()
        };
        assert!(matches!(
            run_build(&config),
            Err(BuildError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_cpp_reserved_entity_fails_before_writing() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        create_test_source(dir.path());
        let catalog_path = dir.path().join("catalog.toml");
        std::fs::write(&catalog_path, "[[entity]]\nname = \"Stone\"\nall = \"stone\"\n\n[[entity]]\nname = \"delete\"\n")
            .expect("write catalog");

        let config = BuildConfig {
            catalog: Some(catalog_path),
            identifier_format: IdentifierFormat::Cpp,
            ..create_test_config(dir.path(), "out")
        };
        assert!(matches!(
            run_build(&config),
            Err(BuildError::InvalidCatalog(_))
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_capacity_overflow_is_a_warning() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        let catalog = parse_catalog(TEST_CATALOG).expect("catalog");
        let mut extracted = ExtractedTextures::default();
        for name in ["a", "b", "c", "d", "e"] {
            extracted
                .images
                .insert(name.to_string(), RgbaImage::from_pixel(16, 16, Rgba([5, 5, 5, 255])));
        }
        let config = BuildConfig {
            canvas_size: 32,
            ..create_test_config(dir.path(), "out")
        };

        let summary = build_from_textures(extracted, &catalog, &config).expect("build");
        assert_eq!(summary.placed, 4);
        assert_eq!(summary.dropped, 1);
        assert!(summary
            .warnings
            .iter()
            .any(|w| matches!(w, BuildWarning::CapacityExceeded { dropped, .. } if dropped == &vec!["e".to_string()])));
    }
}
