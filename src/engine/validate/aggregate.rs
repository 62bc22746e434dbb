use std::collections::BTreeMap;

use crate::domain::report::IssueGroup;
use crate::engine::registry::RuleRegistry;
use crate::engine::validate::RecordFindings;

/// Ordering rank of one issue group: field registration rank first (labels
/// with no field spec sort after every registered field), then the earliest
/// rule able to produce the issue, then the issue text.
type GroupRank = (usize, usize);

struct GroupSlot {
    rank: GroupRank,
    count: usize,
}

/// Merges any number of per-record finding pools into deterministically
/// ordered issue groups. This is the single reduction point of a run: workers
/// may evaluate records independently, but counts only exist after this merge.
pub fn aggregate<I>(pools: I, registry: &RuleRegistry) -> Vec<IssueGroup>
where
    I: IntoIterator<Item = RecordFindings>,
{
    let mut slots: BTreeMap<(String, String), GroupSlot> = BTreeMap::new();

    for pool in pools {
        for entry in pool.entries {
            let rank = (
                field_rank(registry, &entry.finding.field),
                entry.rule_index,
            );
            slots
                .entry((entry.finding.field, entry.finding.issue))
                .and_modify(|slot| {
                    slot.count += 1;
                    if rank < slot.rank {
                        slot.rank = rank;
                    }
                })
                .or_insert(GroupSlot { rank, count: 1 });
        }
    }

    let mut groups: Vec<(GroupRank, IssueGroup)> = slots
        .into_iter()
        .map(|((field, issue), slot)| {
            (
                slot.rank,
                IssueGroup {
                    field,
                    issue,
                    count: slot.count,
                },
            )
        })
        .collect();
    groups.sort_by(|left, right| {
        left.0
            .cmp(&right.0)
            .then_with(|| left.1.field.cmp(&right.1.field))
            .then_with(|| left.1.issue.cmp(&right.1.issue))
    });
    groups.into_iter().map(|(_, group)| group).collect()
}

fn field_rank(registry: &RuleRegistry, field: &str) -> usize {
    registry.field_rank(field).unwrap_or(usize::MAX)
}
