use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg("tests/fixtures/line_items.json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "segment,policy type,location,payin,remark,Calculated Payout,Formula Used,Rule Explanation",
        ))
        // Two-wheeler above 50% loses five points
        .stdout(predicate::str::contains(
            "TW SAOD + COMP,Comp,Pune,63.00%,Bikes <75 CC,58.00%,-5%",
        ))
        // NIL remark applies regardless of band
        .stdout(predicate::str::contains(
            "PVT CAR COMP + SAOD,Comp,Mumbai,40.00%,,36.00%,90% of Payin",
        ))
        // Unknown segment passes through
        .stdout(predicate::str::contains(
            "Unknown Segment XYZ,Comp,Delhi,10.00%,,10.00%,no matching rule",
        ))
        .stdout(predicate::str::contains(
            "8 & above; Contract transporter,68.00%,Less 2% of Payin",
        ));

    Ok(())
}

#[test]
fn test_cli_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("payout-engine"))
        .arg("tests/fixtures/line_items.json")
        .args(["--format", "json", "--company", "Digit"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["title"], "Digit - Policy Data");
    assert_eq!(report["metrics"]["total_records"], 4);
    // (63 + 40 + 10 + 70) / 4 = 45.75
    assert_eq!(report["metrics"]["avg_payin"], serde_json::json!(45.8));
    assert_eq!(report["metrics"]["unique_segments"], 4);
    assert_eq!(report["metrics"]["formula_summary"]["no matching rule"], 1);
    assert_eq!(report["calculated_data"].as_array().map(Vec::len), Some(4));
    assert!(report["formula_data"].as_array().is_some_and(|rules| !rules.is_empty()));

    Ok(())
}

#[test]
fn test_cli_company_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("payout-engine"))
        .arg("tests/fixtures/line_items.json")
        .args(["--format", "json"])
        .env("PAYOUT_COMPANY", "Liberty")
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["metrics"]["company_name"], "Liberty");

    Ok(())
}

#[test]
fn test_cli_writes_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let report_path = dir.path().join("report.csv");

    Command::new(cargo_bin!("payout-engine"))
        .arg("tests/fixtures/line_items.json")
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&report_path)?;
    // Header + 4 rows
    assert_eq!(content.lines().count(), 5);

    Ok(())
}

#[test]
fn test_cli_missing_input() {
    Command::new(cargo_bin!("payout-engine"))
        .arg("tests/fixtures/does_not_exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_cli_custom_rule_table_first_match_wins() {
    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    std::io::Write::write_all(
        &mut json,
        br#"[{"segment": "CITY TAXI", "location": "Pune", "payin": "40%"}]"#,
    )
    .unwrap();

    Command::new(cargo_bin!("payout-engine"))
        .arg(json.path())
        .args(["--rules", "tests/fixtures/ambiguous_rules.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CITY TAXI,Comp,Pune,40.00%,,38.00%,-2%,\"Match: LOB=TAXI, Segment=TAXI, NIL\"",
        ));
}
