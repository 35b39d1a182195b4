use std::io::Write;

use anyhow::Result;

use crate::duplicates::{DuplicateMap, DuplicateStatistics, Group};
use crate::io::{self, Record};
use crate::reader::ReadError;

/// Options controlling which duplicate groups are emitted, and how.
pub struct CallOpts {
    /// Groups with fewer members than this are dropped. A value of 0 or 1
    /// never filters anything.
    pub min_copies: usize,
    /// Emit one read per original group member instead of a single
    /// consolidated read.
    pub preserve_copies: bool,
}

/// Collapses a stream of reads into duplicate groups and writes one (or,
/// with `preserve_copies`, `abundance`) output read per group that meets
/// the copy number threshold.
///
/// The input is drained completely before anything is written: a group's
/// final abundance is unknown until the end of the stream. Groups are
/// numbered by first appearance of their sequence, and a group that falls
/// under the threshold still consumes its number.
///
/// # Arguments
///
/// * `records` - The parsed reads; iteration stops at the first error.
/// * `writer` - A mutable reference to an object that implements the `Write` trait,
///   used for writing the output.
/// * `opts` - A `CallOpts` describing the threshold and copy handling.
///
/// # Returns
///
/// * `Result<DuplicateStatistics>` - Summary statistics over every group,
///   including the filtered ones, or the first error encountered.
pub fn call(
    records: impl Iterator<Item = Result<Record, ReadError>>,
    writer: &mut impl Write,
    opts: &CallOpts,
) -> Result<DuplicateStatistics> {
    let mut map = DuplicateMap::new();
    let mut read_count = 0usize;

    for record in records {
        map.insert(record?);

        read_count += 1;
        if read_count % 50000 == 0 {
            info!("Processed: {read_count}");
        }
    }

    map.shrink_to_fit(); // optimise memory usage

    let stats = map.statistics();

    let mut emitted = 0usize;
    let mut kept_groups = 0usize;

    for group in map.groups() {
        if group.abundance() < opts.min_copies {
            continue;
        }

        kept_groups += 1;
        emitted += call_group(&group, writer, opts.preserve_copies)?;
    }

    info!(
        "Collapsed {} reads into {} groups; kept {} groups, wrote {} reads",
        stats.total_reads,
        map.len(),
        kept_groups,
        emitted
    );

    Ok(stats)
}

/// Writes one duplicate group, either consolidated into a single read or
/// expanded back to its original copy number. Returns the number of reads
/// written.
fn call_group(group: &Group, writer: &mut impl Write, preserve_copies: bool) -> Result<usize> {
    let consensus = consensus_quality(group);

    if preserve_copies {
        for copy in 1..=group.abundance() {
            let name = format!("{}_{}", group.id, copy);
            io::write_read(writer, &name, group.seq, consensus.as_deref())?;
        }
        Ok(group.abundance())
    } else {
        io::write_read(writer, &group.id.to_string(), group.seq, consensus.as_deref())?;
        Ok(1)
    }
}

/// The per-base consensus quality of a group: at every position, the
/// integer mean of the member scores, with the fractional remainder
/// discarded. `None` for groups without quality data.
fn consensus_quality(group: &Group) -> Option<Vec<u8>> {
    let quals: Option<Vec<&[u8]>> = group.members.iter().map(|m| m.as_deref()).collect();
    let quals = quals?;

    let abundance = quals.len();

    Some(
        (0..group.seq.len())
            .map(|pos| {
                let total: usize = quals.iter().map(|q| q[pos] as usize).sum();
                (total / abundance) as u8
            })
            .collect(),
    )
}
