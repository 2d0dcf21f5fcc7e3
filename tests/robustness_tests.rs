use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_malformed_records_do_not_abort_batch() {
    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(
        json,
        r#"[
            {{"segment": "TAXI", "location": "Goa", "payin": "25%"}},
            {{"segment": {{"nested": true}}, "location": "Pune", "payin": "30%"}},
            {{"segment": "STAFF BUS", "location": "Surat", "payin": 50}}
        ]"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg(json.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("skipping malformed line item"))
        .stdout(predicate::str::contains("TAXI,Comp,Goa,25.00%,,22.00%,-3%"))
        .stdout(predicate::str::contains(",Comp,Pune,30%,Error,Error,Error,"))
        .stdout(predicate::str::contains("STAFF BUS,Comp,Surat,50.00%,,44.00%,88% of Payin"));
}

#[test]
fn test_unparseable_payin_defaults_to_zero() {
    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "segment,policy_type,location,payin,remark").unwrap();
    writeln!(csv, "TW TP,TP,Nagpur,abc,").unwrap();
    writeln!(csv, "TW TP,TP,Nashik,N/A,").unwrap();
    writeln!(csv, "TW TP,TP,Thane,-15%,").unwrap();

    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("could not parse payin"))
        .stdout(predicate::str::contains("TW TP,TP,Nagpur,0.00%,,0.00%,-2%"))
        .stdout(predicate::str::contains("TW TP,TP,Nashik,0.00%,,0.00%,-2%"))
        .stdout(predicate::str::contains("TW TP,TP,Thane,15.00%,,13.00%,-2%"));
}

#[test]
fn test_fenced_extractor_output() {
    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(json, "```json").unwrap();
    writeln!(json, r#"[{{"segment": "Misd, Tractor", "payin": 40}}]"#).unwrap();
    writeln!(json, "```").unwrap();

    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg(json.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Misd, Tractor"))
        .stdout(predicate::str::contains("35.20%,88% of Payin"));
}

#[test]
fn test_empty_batch_is_rejected() {
    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(json, "[]").unwrap();

    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg(json.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No line items to process"));
}

#[test]
fn test_invalid_rule_file_is_rejected() {
    let mut rules = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(rules, "LOB,SEGMENT,PO,REMARKS").unwrap();
    writeln!(rules, "TAXI,TAXI,triple it,NIL").unwrap();

    let mut cmd = Command::new(cargo_bin!("payout-engine"));
    cmd.arg("tests/fixtures/line_items.json")
        .arg("--rules")
        .arg(rules.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rule at row 1"));
}
