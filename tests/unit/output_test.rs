//! Tests for the Output module
//!
//! Rendered results are API data types; JSON mode prints them as they
//! serialize.

use docverify::api::{self, InstitutionsData, RequestsData};
use docverify::output::{OperationResult, OutputMode, Render};

use crate::common::{TestEnv, regulator};

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn operation_result_serialization() {
    let result = OperationResult::ok("Initialized");
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"success\":true"));
    assert!(json.contains("Initialized"));
}

#[test]
fn request_detail_flattens_summary() {
    let env = TestEnv::new();
    let id = env.submit().id;
    let detail = api::get_request(&env.workflow, &regulator(), &id).unwrap();

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["current_phase"], 1);
    assert_eq!(json["student_id"], "STU-2019-0042");
    assert!(json.get("summary").is_none());
    assert!(json.get("completed_at").is_none());
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn empty_results_render_in_both_modes() {
    let requests = RequestsData { requests: vec![] };
    let institutions = InstitutionsData {
        institutions: vec![],
    };
    for mode in [OutputMode::Human, OutputMode::Json] {
        requests.render(mode);
        institutions.render(mode);
    }
}

#[test]
fn processed_request_renders_in_both_modes() {
    let env = TestEnv::with_scores(&[50]);
    let id = env.submit().id;
    let data = api::process_phase(
        &env.workflow,
        &regulator(),
        &id,
        &api::ProcessPhaseRequest {
            phase: 1,
            score: None,
        },
    )
    .unwrap();

    data.render(OutputMode::Human);
    data.render(OutputMode::Json);
    data.request.render(OutputMode::Human);
}
