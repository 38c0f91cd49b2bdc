use day12_24::{
    grid::{Grid, MoveRule},
    hill::{ClimbRule, HeightMap, HillGoal},
    FormatError, Marker, Position,
};

const SAMPLE: [&str; 5] = [
    "Sabqponm",
    "abcryxxl",
    "accszExk",
    "acctuvwj",
    "abdefghi",
];

fn ramp(side_len: usize) -> Grid<u8> {
    let rows: Vec<Vec<u8>> = (0..side_len)
        .map(|r| (0..side_len).map(|c| (r + c) as u8).collect())
        .collect();

    Grid::from_rows(rows).unwrap()
}

#[test]
fn climb_rules_are_not_symmetric() {
    assert!(!ClimbRule::Ascending.can_move(&5, &7));
    assert!(ClimbRule::Descending.can_move(&5, &7));

    for (from, to) in [(0u8, 0u8), (3, 4), (4, 3), (3, 5), (5, 3), (0, 25), (25, 0)] {
        assert_eq!(ClimbRule::Ascending.can_move(&from, &to), to <= from + 1);
        assert_eq!(ClimbRule::Descending.can_move(&from, &to), to + 1 >= from);
    }
}

#[test]
fn parse_replaces_sentinels() {
    let map = HeightMap::try_from_lines(SAMPLE).unwrap();

    assert_eq!(map.start_pos(), Position::new(0, 0));
    assert_eq!(map.end_pos(), Position::new(2, 5));
    assert_eq!(map.elevation(&map.start_pos()), Some(0));
    assert_eq!(map.elevation(&map.end_pos()), Some(25));
    assert_eq!(map.elevation(&Position::new(1, 3)), Some(b'r' - b'a'));
    assert_eq!(map.elevation(&Position::new(5, 0)), None);
}

#[test]
fn sample_fewest_steps() {
    let map = HeightMap::try_from_lines(SAMPLE).unwrap();

    assert_eq!(map.fewest_steps_to_top().unwrap(), 31);
    assert_eq!(map.fewest_steps_from_lowest().unwrap(), 29);
    assert_eq!(map.fewest_steps_from_lowest_exhaustive().unwrap(), 29);
}

#[test]
fn unobstructed_ramp_takes_manhattan_dist() {
    let map = HeightMap::new(ramp(5), Position::new(0, 0), Position::new(4, 4));

    assert_eq!(map.fewest_steps_to_top().unwrap(), 8);
    assert_eq!(
        map.fewest_steps(
            Position::new(4, 4),
            HillGoal::Position(Position::new(0, 0)),
            ClimbRule::Descending
        )
        .unwrap(),
        8
    );
}

#[test]
fn backward_search_stops_at_nearest_lowest() {
    let map = HeightMap::new(ramp(5), Position::new(0, 0), Position::new(4, 4));

    assert_eq!(
        map.fewest_steps(
            Position::new(4, 4),
            HillGoal::Elevation(3),
            ClimbRule::Descending
        )
        .unwrap(),
        5
    );
}

#[test]
fn walled_off_end_has_no_path() {
    let map = HeightMap::try_from_lines(["Sazz", "aazz", "zzzE"]).unwrap();

    assert!(map.fewest_steps_to_top().is_err());
    assert!(map.fewest_steps_from_lowest().is_err());
    assert!(map.fewest_steps_from_lowest_exhaustive().is_err());
}

#[test]
fn malformed_maps_are_rejected() {
    assert!(matches!(
        HeightMap::try_from_lines(["Sab", "abc", "bcd"]),
        Err(FormatError::MissingMarker(Marker::End))
    ));
    assert!(matches!(
        HeightMap::try_from_lines(["abc", "bcE"]),
        Err(FormatError::MissingMarker(Marker::Start))
    ));
    assert!(matches!(
        HeightMap::try_from_lines(["SaE", "bcE"]),
        Err(FormatError::DuplicateMarker(Marker::End, _, _))
    ));
    assert!(matches!(
        HeightMap::try_from_lines(["Sab", "abcE"]),
        Err(FormatError::InconsistentRow {
            row: 1,
            expect: 3,
            given: 4
        })
    ));
    assert!(matches!(
        HeightMap::try_from_lines(["Sa1", "abE"]),
        Err(FormatError::InvalidChar('1', _))
    ));
    assert!(matches!(
        HeightMap::try_from_lines(Vec::<&str>::new()),
        Err(FormatError::EmptyGrid)
    ));
}
