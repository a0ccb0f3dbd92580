//! Pipeline documents: a transform tree plus the seed and label policy to
//! run it with, stored as YAML or JSON.
//!
//! ```yaml
//! seed: 42
//! bbox:
//!   min_area: 20
//!   min_visibility: 0.1
//! pipeline:
//!   op: sequential
//!   steps:
//!     - op: sometimes
//!       p: 0.5
//!       then: { op: flip_horizontal }
//!     - op: pad
//!       amount:
//!         pixels:
//!           top_bottom: { min: 0, max: 30 }
//!           left_right: { min: 0, max: 10 }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{BBoxPolicy, Config};
use crate::error::AugmentError;
use crate::transform::Transform;

/// A complete, runnable pipeline description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub bbox: BBoxPolicy,
    pub pipeline: Transform,
}

impl PipelineDocument {
    /// Builds the run configuration, validating the label policy.
    ///
    /// `seed` overrides the document's own seed when given.
    pub fn config(&self, seed: Option<u64>) -> Result<Config, AugmentError> {
        let policy = BBoxPolicy::new(self.bbox.min_area, self.bbox.min_visibility)?;
        Ok(Config::new(seed.unwrap_or(self.seed), policy))
    }
}

/// Reads a pipeline document, as JSON if the extension is `.json` and as
/// YAML otherwise.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_pipeline(path: &Path) -> Result<PipelineDocument, AugmentError> {
    let file = File::open(path).map_err(AugmentError::Io)?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_reader(reader).map_err(|source| AugmentError::PipelineJsonParse {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_reader(reader).map_err(|source| AugmentError::PipelineParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parses a YAML pipeline document from a string.
pub fn from_yaml_str(yaml: &str) -> Result<PipelineDocument, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Parses a YAML pipeline document from raw bytes.
///
/// Useful for fuzzing, where input is not guaranteed to be UTF-8.
pub fn from_yaml_slice(bytes: &[u8]) -> Result<PipelineDocument, serde_yaml::Error> {
    serde_yaml::from_slice(bytes)
}

/// Fuzz-only entrypoint: parses a YAML document, validates its label
/// policy and renders the transform tree.
#[cfg(feature = "fuzzing")]
pub fn fuzz_check_pipeline(bytes: &[u8]) -> Result<(), AugmentError> {
    let doc = from_yaml_slice(bytes).map_err(|source| AugmentError::PipelineParse {
        path: std::path::PathBuf::from("<fuzz>"),
        source,
    })?;
    doc.config(None)?;
    let _ = doc.pipeline.to_string();
    Ok(())
}

/// Parses a JSON pipeline document from a string.
pub fn from_json_str(json: &str) -> Result<PipelineDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a pipeline document to a JSON string.
pub fn to_json_string(doc: &PipelineDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ResizeAlgorithm;
    use crate::geom::{IntRange, Rect, SideMask, SideRanges, Sides};
    use crate::transform::{CropRegion, PadAmount, TargetSize};

    const SAMPLE: &str = r#"
seed: 7
bbox:
  min_area: 20
  min_visibility: 0.1
pipeline:
  op: sequential
  steps:
    - op: sometimes
      p: 0.5
      then: { op: flip_horizontal }
    - op: pad
      amount:
        pixels:
          top_bottom: { min: 0, max: 30 }
          left_right: { min: 0, max: 10 }
    - op: one_of
      choices:
        - op: flip_vertical
        - op: noop
    - op: some_of
      count: { min: 0, max: 2 }
      choices:
        - op: crop
          region:
            fixed: { xmin: 10, ymin: 10, xmax: 140, ymax: 120 }
        - op: resize
          size:
            fixed: { width: 64, height: 64 }
          algorithms: [nearest, lanczos3]
"#;

    fn expected() -> PipelineDocument {
        PipelineDocument {
            seed: 7,
            bbox: BBoxPolicy::new(20, 0.1).expect("valid policy"),
            pipeline: Transform::sequential([
                Transform::sometimes(0.5, Transform::FlipHorizontal),
                Transform::pad(PadAmount::Pixels(
                    SideRanges::new()
                        .with(SideMask::TopBottom, IntRange::new(0, 30).expect("range"))
                        .with(SideMask::LeftRight, IntRange::new(0, 10).expect("range")),
                ))
                .expect("valid pad"),
                Transform::one_of([Transform::FlipVertical, Transform::Noop]),
                Transform::some_of(
                    IntRange::new(0, 2).expect("range"),
                    [
                        Transform::crop(CropRegion::Fixed(Rect::from_xyxy(10, 10, 140, 120))),
                        Transform::resize(
                            TargetSize::Fixed {
                                width: 64,
                                height: 64,
                            },
                            vec![ResizeAlgorithm::Nearest, ResizeAlgorithm::Lanczos3],
                        )
                        .expect("valid resize"),
                    ],
                ),
            ]),
        }
    }

    #[test]
    fn parses_yaml_document() {
        let doc = from_yaml_str(SAMPLE).expect("parse pipeline");
        assert_eq!(doc, expected());
    }

    #[test]
    fn json_roundtrip() {
        let json = to_json_string(&expected()).expect("serialize");
        assert!(json.contains("\"op\": \"some_of\""));
        assert_eq!(from_json_str(&json).expect("parse"), expected());
    }

    #[test]
    fn parses_json_document() {
        let json = r#"{
            "pipeline": {"op": "pad", "amount": {"fixed": {"left": 3, "bottom": 2}}}
        }"#;
        let doc = from_json_str(json).expect("parse pipeline");
        assert_eq!(doc.seed, 0);
        assert_eq!(doc.bbox, BBoxPolicy::default());
        assert_eq!(
            doc.pipeline,
            Transform::pad(PadAmount::Fixed(Sides::new(3, 0, 0, 2))).expect("valid pad")
        );
    }

    #[test]
    fn rejects_empty_ranges_and_unknown_ops() {
        let empty = "pipeline:\n  op: some_of\n  count: {min: 2, max: 2}\n  choices: []\n";
        assert!(from_yaml_str(empty).is_err());

        let unknown = "pipeline:\n  op: rotate\n";
        assert!(from_yaml_str(unknown).is_err());
    }

    #[test]
    fn seed_override_wins() {
        let doc = from_yaml_str(SAMPLE).expect("parse pipeline");
        assert_eq!(doc.config(None).expect("config").seed(), 7);
        assert_eq!(doc.config(Some(99)).expect("config").seed(), 99);
    }

    #[test]
    fn invalid_policy_is_reported() {
        let doc = from_yaml_str("bbox: {min_area: -5}\npipeline: {op: noop}\n").expect("parse");
        assert!(matches!(
            doc.config(None),
            Err(AugmentError::InvalidParameter(_))
        ));
    }

    #[cfg(feature = "fuzzing")]
    #[test]
    fn fuzz_entrypoint_reports_errors() {
        assert!(fuzz_check_pipeline(SAMPLE.as_bytes()).is_ok());
        assert!(matches!(
            fuzz_check_pipeline(b"pipeline: {op: rotate}"),
            Err(AugmentError::PipelineParse { .. })
        ));
        assert!(matches!(
            fuzz_check_pipeline(b"bbox: {min_area: -1}\npipeline: {op: noop}"),
            Err(AugmentError::InvalidParameter(_))
        ));
    }

    #[test]
    fn read_pipeline_picks_parser_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml_path = dir.path().join("p.yaml");
        let json_path = dir.path().join("p.json");
        std::fs::write(&yaml_path, SAMPLE).expect("write yaml");
        std::fs::write(&json_path, r#"{"pipeline": {"op": "flip_vertical"}}"#)
            .expect("write json");

        assert_eq!(read_pipeline(&yaml_path).expect("yaml"), expected());
        assert_eq!(
            read_pipeline(&json_path).expect("json").pipeline,
            Transform::FlipVertical
        );

        std::fs::write(&json_path, "pipeline: {op: noop}").expect("write bad json");
        assert!(matches!(
            read_pipeline(&json_path),
            Err(AugmentError::PipelineJsonParse { .. })
        ));
    }
}
