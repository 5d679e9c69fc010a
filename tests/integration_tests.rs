use assert_approx_eq::assert_approx_eq;
use caddie_engine::aim::AimState;
use caddie_engine::clubs::{ellipse_from_shots, merge_shots, table_from_shots, MergeSummary, CHI2_95};
use caddie_engine::data::{parse_shots_csv, read_table_from_file, write_table_to_file};
use caddie_engine::geo::{bearing_degrees, distance_yards};
use caddie_engine::render::{AimController, RenderFrame, RenderSettings};
use caddie_engine::GeoPoint;

const SESSION: &str = "\
Shot_No,Club,Flat_Carry,Offline,Type
1,7-Iron,149.5,-9.0,Clean
2,7-Iron,151.0,-11.5,Clean
3,7-Iron,152.5,-10.5,Clean
4,7-Iron,118.0,14.0,Mishit
5,LW,88.0,-0.5,Clean
6,LW,89.6,-0.5,Clean
";

#[test]
fn integration_session_to_rendered_frame() {
    // Shots -> club table -> bundle on disk.
    let mut shots = Vec::new();
    let batch = parse_shots_csv(SESSION.as_bytes()).expect("shots");
    let first = merge_shots(&mut shots, batch, "Range");
    assert_eq!(first, MergeSummary { added: 6, updated: 0 });
    // Re-uploading the same export replaces rather than duplicates.
    let batch = parse_shots_csv(SESSION.as_bytes()).expect("shots");
    let again = merge_shots(&mut shots, batch, "Range");
    assert_eq!(again, MergeSummary { added: 0, updated: 6 });
    assert_eq!(shots.len(), 6);

    let e95 = ellipse_from_shots("7-Iron", &shots, CHI2_95).expect("ellipse");
    assert!(e95.a >= e95.b && e95.b > 0.0);
    assert!(ellipse_from_shots("LW", &shots, CHI2_95).is_none());

    let table = table_from_shots(&shots).expect("table");
    assert_eq!(table.len(), 2);
    let seven = table.get("7-Iron").expect("7-Iron");
    assert_approx_eq!(seven.average_carry, 151.0, 1e-9);
    assert!(seven.average_lateral_offset > 0.0);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("clubs.bin");
    write_table_to_file(&table, &path).expect("write");
    let table = read_table_from_file(&path).expect("read");

    // Ball and flag.
    let ball = GeoPoint::new(36.5651, -121.9472).unwrap();
    let flag = GeoPoint::new(36.5670, -121.9450).unwrap();
    let d = distance_yards(&ball, &flag);
    assert_approx_eq!(d, distance_yards(&flag, &ball), 1e-9);
    assert_eq!(bearing_degrees(&ball, &ball), 0.0);

    // Event loop: fix, click, render.
    let aim = AimState::with_default_target(ball).unwrap();
    let mut controller = AimController::new(aim, "7-Iron", RenderSettings::default());
    controller.on_click(flag);
    let mut frames: Vec<RenderFrame> = Vec::new();
    controller.render(&table, &mut frames).expect("render");

    let frame = &frames[0];
    assert_approx_eq!(frame.distance_yards, d, 1e-9);
    for ring in &frame.contours {
        assert!(ring.is_closed());
        let centroid = ring.centroid().unwrap();
        assert_approx_eq!(centroid.latitude(), flag.latitude(), 1e-9);
        assert!(centroid.longitude() > flag.longitude());
    }
}
