use profiler_core::config::{AppConfig, LoadOptions};
use profiler_core::{CustomerProfile, CustomerRecord, LtvSegment, ProfileGenerator, CAMPING_TENTS};
use serde::Serialize;

use crate::commands::{escape_json, CommandResult};

const SELF_CHECK_RECORD: &str = r#"{
    "aov": 200,
    "discount_sensitivity": "high",
    "browsing": [{"item": "tent", "count": 1}],
    "brand_affinity": ["Acme"],
    "last_purchase": "10 days ago",
    "purchases": [{"name": "hiking boots"}]
}"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool, options: LoadOptions) -> CommandResult {
    let report = build_report(options);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let checks = vec![check_config(options), check_engine()];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config(options: LoadOptions) -> DoctorCheck {
    match AppConfig::load(options) {
        Ok(config) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: format!(
                "configuration loaded (log level `{}`, output `{}`)",
                config.logging.level,
                config.output.format.as_str()
            ),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_engine() -> DoctorCheck {
    let expected = CustomerProfile {
        ltv_segment: LtvSegment::High,
        discount_sensitive: true,
        recommendations: vec![CAMPING_TENTS.to_string()],
        loyalty_flag: true,
        churn_risk: false,
        cross_sell_opportunity: true,
        needs_more_data: false,
    };

    let record = match CustomerRecord::from_json_str(SELF_CHECK_RECORD) {
        Ok(record) => record,
        Err(error) => {
            return DoctorCheck {
                name: "engine_self_check",
                status: CheckStatus::Fail,
                details: format!("reference record did not decode: {error}"),
            };
        }
    };

    let actual = ProfileGenerator::new().generate(&record);
    if actual == expected {
        DoctorCheck {
            name: "engine_self_check",
            status: CheckStatus::Pass,
            details: "reference record produced the expected profile".to_string(),
        }
    } else {
        DoctorCheck {
            name: "engine_self_check",
            status: CheckStatus::Fail,
            details: format!("reference profile mismatch: expected {expected:?}, got {actual:?}"),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
