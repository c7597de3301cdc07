//! Fill-rate statistics over produced records.

use crate::core::record::Record;

/// How many records carry each kind of data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub threads: usize,
    pub with_email: usize,
    pub with_shift_id: usize,
    pub with_reaction: usize,
    pub with_reply: usize,
}

impl ProcessingStats {
    /// Counts fields over a batch of records.
    pub fn from_records(records: &[Record]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.threads += 1;
            stats.with_email += usize::from(record.email().is_some());
            stats.with_shift_id += usize::from(record.shift_id().is_some());
            stats.with_reaction += usize::from(record.reaction_emote().is_some());
            stats.with_reply += usize::from(record.has_reply());
            stats
        })
    }

    /// Adds another batch's counts to this one.
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.threads += other.threads;
        self.with_email += other.with_email;
        self.with_shift_id += other.with_shift_id;
        self.with_reaction += other.with_reaction;
        self.with_reply += other.with_reply;
    }

    /// Share of threads that got a reply, in percent.
    pub fn reply_rate(&self) -> f64 {
        if self.threads == 0 {
            return 0.0;
        }
        self.with_reply as f64 / self.threads as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let records = vec![
            Record::new()
                .with_email("a@b.com")
                .with_shift_id(1)
                .with_reaction("check", Some("u1")),
            Record::new().with_reply("ok", "u2", "2024-01-01 00:00:00"),
            Record::new(),
        ];
        let stats = ProcessingStats::from_records(&records);
        assert_eq!(
            stats,
            ProcessingStats {
                threads: 3,
                with_email: 1,
                with_shift_id: 1,
                with_reaction: 1,
                with_reply: 1,
            }
        );
    }

    #[test]
    fn test_reply_rate() {
        let stats = ProcessingStats {
            threads: 4,
            with_reply: 1,
            ..ProcessingStats::default()
        };
        assert!((stats.reply_rate() - 25.0).abs() < f64::EPSILON);
        assert!(ProcessingStats::default().reply_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_merge() {
        let mut total = ProcessingStats::from_records(&[Record::new().with_email("a@b")]);
        total.merge(&ProcessingStats::from_records(&[Record::new(), Record::new()]));
        assert_eq!(total.threads, 3);
        assert_eq!(total.with_email, 1);
    }
}
