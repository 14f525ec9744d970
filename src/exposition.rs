//! Prometheus text exposition (format version 0.0.4).
//!
//! Samples sharing a metric name are grouped under a single
//! `# HELP` / `# TYPE` header, in order of first appearance.
//! The value is written as-is on the metric name itself, so a
//! summary here carries no `_sum` / `_count` series.

use std::fmt::Write;

use crate::schema::{MetricSample, Snapshot};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn encode(snapshot: &Snapshot) -> String {
    let mut families: Vec<(&str, Vec<&MetricSample>)> = Vec::new();
    for sample in snapshot.samples() {
        match families.iter_mut().find(|(name, _)| *name == sample.metric_name) {
            Some((_, members)) => members.push(sample),
            None => families.push((sample.metric_name, vec![sample])),
        }
    }

    let mut out = String::new();
    for (name, members) in families {
        let head = members[0];
        // Writing into a String cannot fail.
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(head.help));
        let _ = writeln!(out, "# TYPE {} {}", name, head.kind);

        for sample in members {
            out.push_str(name);
            if !sample.labels.is_empty() {
                let labels: Vec<String> = sample
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                    .collect();
                let _ = write!(out, "{{{}}}", labels.join(","));
            }
            let _ = writeln!(out, " {}", format_value(sample.value));
        }
    }
    out
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_encodes_to_empty_body() {
        assert_eq!(encode(&Snapshot::default()), "");
    }

    #[test]
    fn groups_samples_under_one_header() {
        let snapshot = Snapshot::new(vec![
            MetricSample::summary("chia_wallet_balance", "Wallet balance", 500.0)
                .with_label("wallet_id", "1"),
            MetricSample::summary("chia_wallet_balance", "Wallet balance", 1200.0)
                .with_label("wallet_id", "2"),
            MetricSample::summary("chia_wallet_height", "Block Height of Chia Wallet", 42.0),
        ]);

        assert_eq!(
            encode(&snapshot),
            "# HELP chia_wallet_balance Wallet balance\n\
             # TYPE chia_wallet_balance summary\n\
             chia_wallet_balance{wallet_id=\"1\"} 500.0\n\
             chia_wallet_balance{wallet_id=\"2\"} 1200.0\n\
             # HELP chia_wallet_height Block Height of Chia Wallet\n\
             # TYPE chia_wallet_height summary\n\
             chia_wallet_height 42.0\n"
        );
    }

    #[test]
    fn labels_are_sorted_and_escaped() {
        let snapshot = Snapshot::new(vec![
            MetricSample::summary("m", "help", 1.5)
                .with_label("z", "a\"b")
                .with_label("a", "c\\d\ne"),
        ]);

        let body = encode(&snapshot);
        assert!(body.ends_with("m{a=\"c\\\\d\\ne\",z=\"a\\\"b\"} 1.5\n"));
    }

    #[test]
    fn special_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(31.25), "31.25");
    }

    #[test]
    fn summary_family_has_no_sum_or_count_series() {
        let body = encode(&Snapshot::new(vec![MetricSample::summary("up", "Up", 1.0)]));

        assert_eq!(body, "# HELP up Up\n# TYPE up summary\nup 1.0\n");
    }
}
