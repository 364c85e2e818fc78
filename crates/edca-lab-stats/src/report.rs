use crate::aggregate::{CategoryAggregate, CategorySummary};
use edca_lab_abstract::{AccessCategory, RunConfig};
use std::fmt;

/// One comma-separated summary row: five blocks of (BE, BK, VI, VO, total)
/// statistics followed by the run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    fields: Vec<String>,
}

impl ReportLine {
    pub fn new(summary: &CategorySummary, config: &RunConfig) -> Self {
        let mut fields = Vec::with_capacity(44);

        let metrics: [fn(&CategoryAggregate) -> f64; 5] = [
            |a: &CategoryAggregate| a.success_probability,
            |a: &CategoryAggregate| a.throughput_mbps,
            |a: &CategoryAggregate| a.mean_queuing_ms,
            |a: &CategoryAggregate| a.mean_access_ms,
            |a: &CategoryAggregate| a.mean_end_to_end_ms,
        ];
        for metric in metrics {
            for aggregate in &summary.per_category {
                fields.push(metric(aggregate).to_string());
            }
            fields.push(metric(&summary.total).to_string());
        }

        fields.push(config.seed.to_string());
        fields.push(config.duration_s.to_string());
        fields.push(config.payload_bytes.to_string());
        fields.push(config.mcs.to_string());
        fields.push(config.channel_width_mhz.to_string());
        fields.push(config.station_count.to_string());
        fields.push(config.per_station_lambda.to_string());
        for ac in AccessCategory::REPORT_ORDER {
            fields.push(ac.index().to_string());
        }
        for ac in AccessCategory::REPORT_ORDER {
            let edca = config.edca(ac);
            fields.push(edca.cw_min_slots().to_string());
            fields.push(edca.cw_stage.to_string());
        }

        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::context::RunContext;
    use crate::decompose::DecomposedRecord;
    use crate::ingest::SeriesKey;
    use edca_lab_abstract::TrafficPlan;

    fn summary(config: &RunConfig) -> CategorySummary {
        let plan = TrafficPlan::build(config).unwrap();
        // 100 BE packets from station 2, each 1 ms queuing and 3 ms access
        let records: Vec<_> = (0..100)
            .map(|_| DecomposedRecord {
                key: SeriesKey { station: 2, link: 0 },
                hol_ms: 0.0,
                queuing_ms: 1.0,
                access_ms: 3.0,
                end_to_end_ms: 4.0,
                failures: 1,
            })
            .collect();
        aggregate(&records, &plan.assignment(), &RunContext::from(config))
    }

    #[test]
    fn column_layout() {
        let config = RunConfig::default();
        let line = ReportLine::new(&summary(&config), &config);
        let f = line.fields();

        assert_eq!(f.len(), 44);
        // success probability
        assert_eq!(f[0], "0.5");
        assert_eq!(f[1], "0");
        assert_eq!(f[4], "0.5");
        // throughput
        assert_eq!(f[5], "0.06");
        assert_eq!(f[9], "0.06");
        // queuing, access, end-to-end
        assert_eq!(f[10], "1");
        assert_eq!(f[15], "3");
        assert_eq!(f[20], "4");
        assert_eq!(f[24], "4");
        // configuration echo
        assert_eq!(&f[25..32], &["6", "20", "1500", "6", "20", "5", "0.00001"]);
        assert_eq!(&f[32..36], &["0", "1", "2", "3"]);
        assert_eq!(&f[36..44], &["15", "6", "15", "6", "7", "4", "3", "2"]);
    }

    #[test]
    fn renders_comma_separated() {
        let config = RunConfig::default();
        let line = ReportLine::new(&summary(&config), &config).to_string();
        assert!(line.starts_with("0.5,0,0,0,0.5,0.06,"));
        assert!(line.ends_with(",3,2"));
        assert_eq!(line.split(',').count(), 44);
    }

    #[test]
    fn values_keep_full_precision() {
        let config = RunConfig::default();
        let plan = TrafficPlan::build(&config).unwrap();
        // six VO successes after one failed attempt
        let records: Vec<_> = (0..6)
            .map(|i| DecomposedRecord {
                key: SeriesKey { station: 5, link: 0 },
                hol_ms: 0.0,
                queuing_ms: 0.0,
                access_ms: 1.0,
                end_to_end_ms: 1.0,
                failures: u32::from(i == 0),
            })
            .collect();
        let summary = aggregate(&records, &plan.assignment(), &RunContext::from(&config));
        let line = ReportLine::new(&summary, &config);

        let vo = &line.fields()[3];
        assert_eq!(*vo, (6.0f64 / 7.0).to_string());
        assert!(vo.len() > "0.857143".len());
        assert_eq!(vo.parse::<f64>().unwrap(), 6.0 / 7.0);
    }
}
