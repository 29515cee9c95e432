#[cfg(test)]
mod tests {
    use crate::record::{BenchKey, BenchRecord};
    use crate::report::parse::parse_results;
    use crate::summary::{RESULTS_HEADER, Summary, SummaryRow, form};
    use anyhow::Result;

    fn record_with(samples: &[f64]) -> BenchRecord {
        let mut record = BenchRecord::new(BenchKey::new("map_add_entry", 1, 10), "plain_mutation");
        for &s in samples {
            record.record_micros(s).expect("valid sample");
        }
        record
    }

    #[test]
    fn single_sample_sets_every_statistic() {
        let s = Summary::from_samples(&[7.25]);
        assert_eq!(s.runs, 1);
        assert_eq!(s.minimum, 7.25);
        assert_eq!(s.maximum, 7.25);
        assert_eq!(s.mean, 7.25);
        assert_eq!(s.median, 7.25);
    }

    #[test]
    fn even_count_median_is_upper_middle() {
        let s = Summary::from_samples(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.minimum, 1.0);
        assert_eq!(s.maximum, 4.0);
    }

    #[test]
    fn odd_count_median_is_middle() {
        let s = Summary::from_samples(&[9.0, 1.0, 5.0]);
        assert_eq!(s.median, 5.0);
    }

    #[test]
    fn statistics_are_bounded_by_min_and_max() {
        let sets: [&[f64]; 4] = [
            &[0.0],
            &[3.0, 3.0, 3.0],
            &[12.5, 0.1, 99.0, 4.0, 4.0, 7.5],
            &[1.0, 1000.0],
        ];
        for samples in sets {
            let s = Summary::from_samples(samples);
            assert!(s.minimum <= s.median && s.median <= s.maximum, "{samples:?}");
            assert!(s.minimum <= s.mean && s.mean <= s.maximum, "{samples:?}");
        }
    }

    #[test]
    #[should_panic(expected = "empty sample set")]
    fn empty_sample_set_panics() {
        Summary::from_samples(&[]);
    }

    #[test]
    fn csv_row_quotes_text_and_formats_numbers() {
        let row = SummaryRow::from_record(&record_with(&[1.0, 2.0, 3.0, 4.0, 5.0]), "rust");
        assert_eq!(
            row.to_csv_row(),
            r#""map_add_entry_1_10","rust","plain_mutation",5,1.00,5.00,3.00,3.00"#
        );
    }

    #[test]
    fn csv_row_parses_back_to_same_statistics() -> Result<()> {
        let row = SummaryRow::from_record(&record_with(&[1.234, 5.678, 0.5, 100.0]), "rust");
        let doc = format!("{RESULTS_HEADER}\n{}", row.to_csv_row());
        let parsed = parse_results(&doc)?;
        assert_eq!(parsed.len(), 1);
        let back = &parsed[0];
        assert_eq!(back.key, "map_add_entry_1_10");
        assert_eq!(back.desc, "plain_mutation");
        assert_eq!(back.runs, 4);
        assert_eq!(form(back.minimum), form(row.stats.minimum));
        assert_eq!(form(back.maximum), form(row.stats.maximum));
        assert_eq!(form(back.mean), form(row.stats.mean));
        assert_eq!(form(back.median), form(row.stats.median));
        Ok(())
    }

    #[test]
    fn quotes_inside_labels_are_doubled() {
        let mut record = BenchRecord::new(BenchKey::new("op", 0, 1), "say \"hi\"");
        record.record_micros(1.0).expect("valid sample");
        let row = SummaryRow::from_record(&record, "rust");
        assert!(row.to_csv_row().starts_with(r#""op_0_1","rust","say ""hi""","#));
    }

    #[test]
    fn invalid_samples_are_rejected_and_not_stored() {
        let mut record = BenchRecord::new(BenchKey::new("op", 0, 1), "plain");
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(record.record_micros(bad).is_err(), "{bad} accepted");
        }
        assert!(record.samples().is_empty());

        record.record_micros(0.0).expect("zero is a valid sample");
        assert_eq!(record.samples().as_slice(), &[0.0]);
    }
}
