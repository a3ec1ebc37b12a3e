use pretty_assertions::assert_eq;
use sar_tick_studio::aggregator::{
    build_channel_histograms, column_statistics, correct_all, correct_observation, correct_value,
    format_stat, remap_histogram, remap_tick, unmap_tick, weighted_stats, RawHistogram,
};
use sar_tick_studio::parser::Observation;
use sar_tick_studio::table::TickTable;
use sar_tick_studio::utils::config::{SarOffsets, REGISTER_COUNT};

fn sample_observations() -> Vec<Observation> {
    vec![
        Observation::new("CH0", 1)
            .with_register(0, 0x03)
            .with_register(1, 0xFE),
        Observation::new("CH1", 5)
            .with_register(0, 0x03)
            .with_register(14, 0x80),
        Observation::new("CH0", 9).with_register(1, 0x00),
        Observation::new("CH3", 13),
    ]
}

#[test]
fn test_correct_value_known_examples() {
    assert_eq!(correct_value(0x03, 0x03), 0x06);
    assert_eq!(correct_value(0xFE, 0xFF), 0xFD);
    assert_eq!(correct_value(0x00, 0xFE), 0xFE);
    assert_eq!(correct_value(0xFF, 0x03), 0x02);
}

#[test]
fn test_correct_observation_is_deterministic() {
    let offsets = SarOffsets::default();
    let obs = sample_observations().remove(0);

    let once = correct_observation(&obs, &offsets);
    let again = correct_observation(&obs, &offsets);

    assert_eq!(once, again);
    assert_eq!(once.hex(0), Some("06".to_string()));
    assert_eq!(once.hex(1), Some("FD".to_string()));
    assert_eq!(once.value(2), None);
    // Input untouched
    assert_eq!(obs.value(0), Some(0x03));
}

#[test]
fn test_histogram_conservation() {
    let corrected = correct_all(&sample_observations(), &SarOffsets::default());
    let histograms = build_channel_histograms(&corrected);

    assert_eq!(histograms.channels().collect::<Vec<_>>(), vec!["CH0", "CH1", "CH3"]);

    let combined = histograms.combined();
    for register in 0..REGISTER_COUNT {
        let expected = corrected
            .iter()
            .filter(|obs| obs.value(register).is_some())
            .count() as u64;
        assert_eq!(combined.column_total(register), expected);
    }

    let remapped = remap_histogram(&combined);
    for register in 0..REGISTER_COUNT {
        assert_eq!(remapped.column_total(register), combined.column_total(register));
    }
}

#[test]
fn test_combined_is_sum_of_channels() {
    let corrected = correct_all(&sample_observations(), &SarOffsets::default());
    let histograms = build_channel_histograms(&corrected);
    let combined = histograms.combined();

    // S1R: 0x03 + 0x03 = 0x06 in both CH0 and CH1
    assert_eq!(histograms.get("CH0").unwrap().count(0x06, 0), 1);
    assert_eq!(histograms.get("CH1").unwrap().count(0x06, 0), 1);
    assert_eq!(combined.count(0x06, 0), 2);

    // CH3 had no register values but still has a zero-filled histogram
    let ch3 = histograms.get("CH3").unwrap();
    assert_eq!(ch3, &RawHistogram::new());
}

#[test]
fn test_remap_bijection() {
    let mut seen = std::collections::BTreeSet::new();
    for raw in 0..=255u8 {
        let tick = remap_tick(raw);
        assert!((-128..=127).contains(&tick));
        assert_eq!(unmap_tick(tick), Some(raw));
        assert!(seen.insert(tick));
    }
    assert_eq!(seen.len(), 256);
    assert_eq!(seen.iter().next(), Some(&-128));
    assert_eq!(seen.iter().last(), Some(&127));
}

#[test]
fn test_remap_histogram_order() {
    let mut raw = RawHistogram::new();
    raw.record(&Observation::new("CH0", 1).with_register(2, 0xFF));

    let table = remap_histogram(&raw);
    let ticks: Vec<i32> = table.ticks().collect();

    assert_eq!(ticks.len(), 256);
    assert_eq!(ticks[0], -128);
    assert_eq!(ticks[127], -1);
    assert_eq!(ticks[128], 0);
    assert_eq!(ticks[255], 127);
    assert_eq!(table.count(-1, 2), 1);
    assert_eq!(table.columns()[2], "S3R");
}

#[test]
fn test_weighted_stats_hand_computed() {
    let stats = weighted_stats(&[(-1, 2), (0, 1), (1, 1)]).unwrap();

    assert_eq!(stats.total_weight, 4);
    assert_eq!(format_stat(Some(stats.mean)), "-0.2500");
    assert!((stats.std - 0.6875f64.sqrt()).abs() < 1e-12);
    assert_eq!(format_stat(Some(stats.std)), "0.8292");
}

#[test]
fn test_weighted_stats_zero_weight() {
    assert_eq!(weighted_stats(&[(-5, 0), (3, 0)]), None);
    assert_eq!(weighted_stats(&[]), None);
    assert_eq!(format_stat(None), "");
}

#[test]
fn test_weighted_stats_single_tick() {
    let stats = weighted_stats(&[(-3, 7), (4, 0)]).unwrap();
    assert_eq!(format_stat(Some(stats.mean)), "-3.0000");
    assert_eq!(format_stat(Some(stats.std)), "0.0000");
}

#[test]
fn test_column_statistics_per_column() {
    let mut table = TickTable::new(vec!["S1R".to_string(), "S2R".to_string()]);
    table.insert_row(-1, vec![2, 0]).unwrap();
    table.insert_row(0, vec![1, 0]).unwrap();
    table.insert_row(1, vec![1, 0]).unwrap();

    let stats = column_statistics(&table);
    assert_eq!(stats.len(), 2);
    assert!(stats[0].is_some());
    assert!(stats[1].is_none());
}

#[test]
fn test_remapped_rows_are_full_width() {
    let corrected = correct_all(&sample_observations(), &SarOffsets::default());
    let table = remap_histogram(&build_channel_histograms(&corrected).combined());

    assert_eq!(table.columns().len(), REGISTER_COUNT);
    assert_eq!(table.len(), 256);
    assert!(table.rows().all(|(_, counts)| counts.len() == REGISTER_COUNT));

    let from_rows =
        TickTable::from_register_rows([(-1, [1; REGISTER_COUNT]), (4, [0; REGISTER_COUNT])]);
    assert_eq!(from_rows.columns()[14], "S15R");
    assert_eq!(from_rows.count(-1, 14), 1);
    assert_eq!(from_rows.ticks().collect::<Vec<_>>(), vec![-1, 4]);
}
