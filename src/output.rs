//! Output formatting for human and JSON modes
//!
//! API response data can be rendered either as human-readable text or
//! machine-parseable JSON.

use serde::Serialize;

use crate::api::{
    DocumentAttachData, InstitutionItem, InstitutionsData, ProcessData, RequestDetailData,
    RequestsData, StatusData,
};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Something the CLI can print in either mode
pub trait Render: Serialize {
    /// Print as human-readable text
    fn render_human(&self);

    /// Print as pretty JSON
    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }

    /// Render the result based on output mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// A successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl Render for OperationResult {
    fn render_human(&self) {
        println!("{}", self.message);
    }
}

impl Render for StatusData {
    fn render_human(&self) {
        println!("docverify {} (scorer: {})", self.version, self.scorer);
        println!("Institutions: {}", self.institutions);
        println!("Requests:     {}", self.requests);
        for (status, count) in &self.by_status {
            if *count > 0 {
                println!("  {status:<22} {count}");
            }
        }
    }
}

impl Render for InstitutionItem {
    fn render_human(&self) {
        println!("Registered {} ({}): {}", self.id, self.kind, self.name);
    }
}

impl Render for InstitutionsData {
    fn render_human(&self) {
        if self.institutions.is_empty() {
            println!("No institutions registered.");
            println!("To add one: docverify institution add <id> <name> --role platform");
            return;
        }
        for i in &self.institutions {
            let state = if i.active { "" } else { " (inactive)" };
            println!("  {:<20} {:<12} {}{state}", i.id, i.kind, i.name);
        }
    }
}

impl Render for RequestsData {
    fn render_human(&self) {
        if self.requests.is_empty() {
            println!("No requests.");
            return;
        }
        for r in &self.requests {
            println!(
                "  {}  phase {}/4  {:<22} {} -> {}  {}",
                r.request_number,
                r.current_phase,
                r.overall_status,
                r.requesting_institution_id,
                r.target_institution_id,
                r.student_name
            );
            println!("          {}", r.id);
        }
        println!("\n{} request(s)", self.requests.len());
    }
}

impl Render for RequestDetailData {
    fn render_human(&self) {
        let s = &self.summary;
        println!("{} [{}]", s.request_number, s.id);
        println!("  Status:      {} (phase {}/4)", s.overall_status, s.current_phase);
        println!("  Type:        {} ({} priority)", s.verification_type, s.priority_level);
        println!("  Student:     {} ({})", s.student_name, self.student_id);
        println!("  Program:     {}, graduated {}", self.program_name, self.graduation_date);
        println!("  From:        {}", s.requesting_institution_id);
        println!("  To:          {}", s.target_institution_id);
        println!("  Score:       {}", s.verification_score);
        println!("  Submitted:   {}", s.submitted_at);
        if let Some(completed) = &self.completed_at {
            println!("  Completed:   {completed}");
        }

        if !self.fraud_flags.is_empty() {
            println!("  Flags:       {}", self.fraud_flags.join(", "));
        }
        for (key, value) in &self.metadata {
            println!("  {key}: {value}");
        }

        if !self.documents.is_empty() {
            println!("\n  Documents:");
            for d in &self.documents {
                println!(
                    "    {} ({}, {} bytes) {}",
                    d.file_name, d.document_type, d.size_bytes, d.validation_status
                );
            }
        }

        if !self.attempts.is_empty() {
            println!("\n  History:");
            for a in &self.attempts {
                let verdict = if a.passed { "passed" } else { "failed" };
                println!(
                    "    phase {} {verdict} with {} (threshold {}) by {} at {}",
                    a.phase, a.score, a.threshold, a.actor_role, a.attempted_at
                );
            }
        }
    }
}

impl Render for ProcessData {
    fn render_human(&self) {
        let a = &self.attempt;
        let r = &self.request.summary;
        if a.passed {
            println!(
                "Phase {} passed: score {} (threshold {})",
                a.phase, a.score, a.threshold
            );
            println!(
                "{} is now {} at phase {}/4",
                r.request_number, r.overall_status, r.current_phase
            );
        } else {
            println!(
                "Phase {} failed: score {} is below threshold {}",
                a.phase, a.score, a.threshold
            );
            println!("{} stays at phase {}", r.request_number, r.current_phase);
        }
    }
}

impl Render for DocumentAttachData {
    fn render_human(&self) {
        let d = &self.document;
        println!(
            "Attached {} ({}, {} bytes) to {}",
            d.file_name, d.document_type, d.size_bytes, self.request_id
        );
        println!("Validation status: {}", d.validation_status);
    }
}
