use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::io::Record;

/// The quality vector of one group member, or `None` for fasta input.
pub type MemberQual = Option<Vec<u8>>;

/// A map of every distinct sequence to the quality vectors of the reads
/// that carry it. Insertion order is preserved, so groups can be numbered
/// stably by first appearance in the input.
#[derive(Default)]
pub struct DuplicateMap {
    by_seq: IndexMap<String, Vec<MemberQual>>,
}

impl DuplicateMap {
    pub fn new() -> Self {
        DuplicateMap {
            by_seq: Default::default(),
        }
    }

    /// Folds a read into its duplicate group, creating the group on the
    /// first sighting of the sequence.
    pub fn insert(&mut self, record: Record) {
        self.by_seq
            .entry(record.seq)
            .or_default()
            .push(record.qual);
    }

    pub fn shrink_to_fit(&mut self) {
        self.by_seq.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.by_seq.len()
    }

    /// Finalized groups in first-seen order, each carrying its 1-based
    /// numeric identity. Every group consumes a number, whether or not the
    /// caller goes on to emit it.
    pub fn groups(&self) -> impl Iterator<Item = Group<'_>> {
        self.by_seq
            .iter()
            .enumerate()
            .map(|(index, (seq, members))| Group {
                id: index + 1,
                seq,
                members,
            })
    }

    /// Computes summary statistics over the finalized map.
    pub fn statistics(&self) -> DuplicateStatistics {
        let mut stats = DuplicateStatistics {
            total_reads: 0,
            duplicate_reads: 0,
            duplicate_ids: 0,
            proportion_duplicate: 0.0,
            distribution: BTreeMap::new(),
        };

        for members in self.by_seq.values() {
            let length = members.len();
            stats.total_reads += length;

            if length > 1 {
                stats.duplicate_ids += 1;
                stats.duplicate_reads += length;

                if let Some(x) = stats.distribution.get_mut(&length) {
                    *x += 1
                } else {
                    stats.distribution.insert(length, 1);
                }
            }
        }

        stats
            .distribution
            .insert(1, stats.total_reads - stats.duplicate_reads);

        if stats.total_reads > 0 {
            stats.proportion_duplicate =
                stats.duplicate_reads as f64 / stats.total_reads as f64;
        }

        stats
    }
}

/// A finalized duplicate group: every read sharing one exact sequence.
///
/// # Fields
///
/// * `id` - A 1-based integer unique to each group, assigned by first
///   appearance of the sequence in the input
/// * `seq` - The sequence shared by every member
/// * `members` - The per-read quality vectors of the group
pub struct Group<'a> {
    pub id: usize,
    pub seq: &'a str,
    pub members: &'a [MemberQual],
}

impl Group<'_> {
    pub fn abundance(&self) -> usize {
        self.members.len()
    }
}

#[derive(Serialize, Debug)]
pub struct DuplicateStatistics {
    pub total_reads: usize,
    pub duplicate_reads: usize,
    pub duplicate_ids: usize,
    pub proportion_duplicate: f64,
    pub distribution: BTreeMap<usize, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fastq_record(seq: &str, qual: &[u8]) -> Record {
        Record {
            id: String::new(),
            seq: seq.to_string(),
            qual: Some(qual.to_vec()),
        }
    }

    fn fasta_record(seq: &str) -> Record {
        Record {
            id: String::new(),
            seq: seq.to_string(),
            qual: None,
        }
    }

    #[test]
    fn groups_by_exact_sequence() {
        let mut map = DuplicateMap::new();
        map.insert(fastq_record("ACGT", b"IIII"));
        map.insert(fastq_record("TTTT", b"JJJJ"));
        map.insert(fastq_record("ACGT", b"KKKK"));

        assert_eq!(map.len(), 2);

        let groups: Vec<_> = map.groups().collect();
        assert_eq!(groups[0].seq, "ACGT");
        assert_eq!(groups[0].abundance(), 2);
        assert_eq!(groups[1].seq, "TTTT");
        assert_eq!(groups[1].abundance(), 1);
    }

    #[test]
    fn numbering_follows_first_appearance() {
        let mut map = DuplicateMap::new();
        for seq in ["CC", "AA", "BB", "AA"] {
            map.insert(fasta_record(seq));
        }

        let ids: Vec<_> = map.groups().map(|g| (g.id, g.seq.to_string())).collect();
        assert_eq!(
            ids,
            vec![
                (1, "CC".to_string()),
                (2, "AA".to_string()),
                (3, "BB".to_string())
            ]
        );
    }

    #[test]
    fn statistics_count_duplicates() {
        let mut map = DuplicateMap::new();
        for seq in ["AA", "AA", "AA", "CC", "GG", "GG"] {
            map.insert(fasta_record(seq));
        }

        let stats = map.statistics();
        assert_eq!(stats.total_reads, 6);
        assert_eq!(stats.duplicate_reads, 5);
        assert_eq!(stats.duplicate_ids, 2);
        assert_eq!(stats.distribution.get(&3), Some(&1));
        assert_eq!(stats.distribution.get(&2), Some(&1));
        assert_eq!(stats.distribution.get(&1), Some(&1));
        assert!((stats.proportion_duplicate - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn statistics_on_empty_map() {
        let stats = DuplicateMap::new().statistics();
        assert_eq!(stats.total_reads, 0);
        assert_eq!(stats.proportion_duplicate, 0.0);
    }
}
