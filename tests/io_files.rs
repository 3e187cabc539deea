#![forbid(unsafe_code)]
use chrono::{TimeZone, Utc};
use roulement::{
    io::{self, ScheduleExport},
    Day, Preferences, Roster, Scheduler, ShiftKind,
};
use std::io::Cursor;
use tempfile::tempdir;

#[test]
fn prompt_keeps_only_exact_labels() {
    let roster = Roster::new(["alice", "bob"]).unwrap();
    // alice : lun matin, mar casse invalide, mer vide, jeu soir (CRLF), ven espaces ;
    // bob : lun après-midi puis EOF
    let input = "morning\nMorning\n\nevening\r\n evening \n\n\nafternoon\n";
    let mut prompt = Vec::new();

    let prefs = io::collect_preferences(&roster, Cursor::new(input), &mut prompt).unwrap();

    assert_eq!(prefs.get("alice", Day::Mon), Some(ShiftKind::Morning));
    assert_eq!(prefs.get("alice", Day::Tue), None);
    assert_eq!(prefs.get("alice", Day::Thu), Some(ShiftKind::Evening));
    assert_eq!(prefs.get("alice", Day::Fri), None);
    assert_eq!(prefs.get("bob", Day::Mon), Some(ShiftKind::Afternoon));
    assert_eq!(prefs.len(), 3);

    let text = String::from_utf8(prompt).unwrap();
    assert!(text.contains("Enter preferences for alice"));
    assert!(text.contains("Enter preferences for bob"));
    let prompts = text.matches("shift (morning/afternoon/evening or enter to skip)");
    assert_eq!(prompts.count(), 14);
}

#[test]
fn csv_import_drops_unknown_people_and_labels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.csv");
    std::fs::write(
        &path,
        "employee,day,shift\n\
         alice,Mon,morning\n\
         alice,Tue,night\n\
         mallory,Wed,evening\n\
         mallory,Someday,evening\n\
         bob,Sun,\n\
         bob,Sat,afternoon\n",
    )
    .unwrap();
    let roster = Roster::new(["alice", "bob"]).unwrap();

    let prefs = io::import_preferences(&path, &roster).unwrap();

    let mut expected = Preferences::new();
    expected.insert("alice", Day::Mon, ShiftKind::Morning);
    expected.insert("bob", Day::Sat, ShiftKind::Afternoon);
    assert_eq!(prefs, expected);
}

#[test]
fn csv_import_rejects_unknown_day() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.csv");
    std::fs::write(&path, "employee,day,shift\nalice,Monday,morning\n").unwrap();
    let roster = Roster::new(["alice"]).unwrap();

    let err = io::import_preferences_csv(&path, &roster).unwrap_err();
    assert!(format!("{err:#}").contains("unknown day label: Monday"));
}

#[test]
fn json_import_reads_nested_map() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{ "alice": { "Fri": "evening", "Sat": "" }, "bob": { "Mon": "afternoon" } }"#,
    )
    .unwrap();
    let roster = Roster::new(["alice", "bob"]).unwrap();

    let prefs = io::import_preferences(&path, &roster).unwrap();

    assert_eq!(prefs.get("alice", Day::Fri), Some(ShiftKind::Evening));
    assert_eq!(prefs.get("alice", Day::Sat), None);
    assert_eq!(prefs.get("bob", Day::Mon), Some(ShiftKind::Afternoon));
}

#[test]
fn exports_write_json_and_csv() {
    let dir = tempdir().unwrap();
    let roster = Roster::new(["alice"]).unwrap();
    let mut prefs = Preferences::new();
    prefs.insert("alice", Day::Mon, ShiftKind::Evening);
    let mut scheduler = Scheduler::new(roster);
    scheduler.match_preferences(&prefs);

    let at = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();
    let export = ScheduleExport::from_grid(scheduler.grid(), Some(42), at);
    let json_path = dir.path().join("week.json");
    io::export_schedule_json(&json_path, &export).unwrap();

    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(value["seed"], 42);
    assert_eq!(value["days"].as_array().unwrap().len(), 7);
    assert_eq!(value["days"][0]["day"], "Mon");
    assert_eq!(value["days"][0]["shifts"][2]["shift"], "evening");
    assert_eq!(value["days"][0]["shifts"][2]["employees"][0], "alice");
    assert_eq!(value["under_filled"].as_array().unwrap().len(), 21);

    let csv_path = dir.path().join("week.csv");
    io::export_schedule_csv(&csv_path, scheduler.grid()).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, "day,shift,slot,employee\nMon,evening,1,alice\n");
}
