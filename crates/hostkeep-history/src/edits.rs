//! Pure edits on a freshly read record set.
//!
//! Every edit keeps the line invariants the generator relies on: the domain
//! records of one line share one ip and one trailing comment, and a line
//! holds at most one comment-only record.

use std::collections::{BTreeMap, BTreeSet};

use hostkeep_format::max_line_number;
use hostkeep_types::{Record, RecordId};

/// Field values written by [`rewrite`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LineFields {
    pub ip: String,
    pub domain: String,
    pub comment: String,
}

impl LineFields {
    pub fn of(record: &Record) -> Self {
        Self {
            ip: record.ip.clone(),
            domain: record.domain.clone(),
            comment: record.comment.clone(),
        }
    }
}

pub(crate) fn position(records: &[Record], id: &RecordId) -> Option<usize> {
    records.iter().position(|r| &r.id == id)
}

/// Append `record` on a new trailing line.
pub(crate) fn append(records: &mut Vec<Record>, mut record: Record) -> RecordId {
    record.line_number = max_line_number(records) + 1;
    let id = record.id.clone();
    records.push(record);
    id
}

/// Remove every record whose id is in `ids`, returning the removed records
/// in their original order.
pub(crate) fn remove(records: &mut Vec<Record>, ids: &BTreeSet<RecordId>) -> Vec<Record> {
    let (removed, kept): (Vec<Record>, Vec<Record>) =
        records.drain(..).partition(|r| ids.contains(&r.id));
    *records = kept;
    removed
}

/// Domain siblings of `line`, skipping the record at `skip`.
fn siblings(records: &[Record], line: u32, skip: usize) -> impl Iterator<Item = (usize, &Record)> {
    records
        .iter()
        .enumerate()
        .filter(move |(i, r)| *i != skip && r.line_number == line && !r.is_comment)
}

/// Returns `true` if a domain record with `ip` may join `line`.
fn hosts_line_accepts(records: &[Record], line: u32, skip: usize, ip: &str) -> bool {
    siblings(records, line, skip).all(|(_, r)| r.ip == ip)
}

/// Overwrite the fields of the record at `index`.
///
/// With `home` set, the record moves back to that line when the line can
/// take it. A domain record whose ip no longer matches its siblings moves to
/// a fresh trailing line; otherwise its comment is applied to every sibling.
pub(crate) fn rewrite(records: &mut [Record], index: usize, fields: LineFields, home: Option<u32>) {
    let current_line = records[index].line_number;
    let mut line = match home {
        Some(home) if home != current_line && hosts_line_accepts(records, home, index, &fields.ip) => {
            home
        }
        _ => current_line,
    };

    if !records[index].is_comment {
        if !hosts_line_accepts(records, line, index, &fields.ip) {
            line = max_line_number(records) + 1;
        }
        let sibling_indices: Vec<usize> = siblings(records, line, index).map(|(i, _)| i).collect();
        for i in sibling_indices {
            records[i].comment = fields.comment.clone();
        }
    }

    let record = &mut records[index];
    record.ip = fields.ip;
    record.domain = fields.domain;
    record.comment = fields.comment;
    record.line_number = line;
}

/// Returns `true` if `group`, which shared one line when it was removed, can
/// go back onto `line` without breaking the line invariants.
fn line_accepts_group(records: &[Record], line: u32, group: &[Record]) -> bool {
    let existing: Vec<&Record> = records.iter().filter(|r| r.line_number == line).collect();

    let restoring_comment = group.iter().any(|r| r.is_comment);
    if restoring_comment && existing.iter().any(|r| r.is_comment) {
        return false;
    }

    match group.iter().find(|r| !r.is_comment) {
        Some(host) => existing
            .iter()
            .filter(|r| !r.is_comment)
            .all(|r| r.ip == host.ip && r.comment == host.comment),
        None => true,
    }
}

/// Put previously removed records back.
///
/// Records are grouped by their original line. A group returns to that line
/// when the line can take it and moves to a fresh trailing line otherwise.
/// Content is restored; physical position is best effort.
pub(crate) fn restore(records: &mut Vec<Record>, restored: Vec<Record>) {
    let mut groups: BTreeMap<u32, Vec<Record>> = BTreeMap::new();
    for record in restored {
        groups.entry(record.line_number).or_default().push(record);
    }

    for (line, group) in groups {
        let target = if line_accepts_group(records, line, &group) {
            line
        } else {
            max_line_number(records) + 1
        };
        for mut record in group {
            record.line_number = target;
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostkeep_format::{generate, parse};

    const SAMPLE: &str = "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com b.com\n";

    fn ids(values: &[&str]) -> BTreeSet<RecordId> {
        values.iter().map(|v| RecordId::from(*v)).collect()
    }

    // -----------------------------------------------------------------------
    // append / remove
    // -----------------------------------------------------------------------

    #[test]
    fn append_uses_next_line() {
        let mut records = parse(SAMPLE);
        append(&mut records, Record::domain(0, "1.2.3.4", "x.com", ""));
        assert_eq!(records.last().unwrap().line_number, 4);
    }

    #[test]
    fn append_to_empty_set_starts_at_one() {
        let mut records = Vec::new();
        append(&mut records, Record::domain(0, "1.2.3.4", "x.com", ""));
        assert_eq!(records[0].line_number, 1);
    }

    #[test]
    fn remove_returns_removed_in_order() {
        let mut records = parse(SAMPLE);
        let removed = remove(&mut records, &ids(&["line-3-b.com", "line-3-a.com"]));
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].domain, "a.com");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn remove_unknown_ids_is_a_no_op() {
        let mut records = parse(SAMPLE);
        assert!(remove(&mut records, &ids(&["line-9"])).is_empty());
        assert_eq!(records.len(), 4);
    }

    // -----------------------------------------------------------------------
    // rewrite
    // -----------------------------------------------------------------------

    #[test]
    fn rewrite_domain_in_place() {
        let mut records = parse(SAMPLE);
        let index = position(&records, &"line-3-b.com".into()).unwrap();
        let mut fields = LineFields::of(&records[index]);
        fields.domain = "c.com".into();
        rewrite(&mut records, index, fields, None);
        assert_eq!(generate(&records), "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com c.com\n");
    }

    #[test]
    fn rewrite_comment_applies_to_siblings() {
        let mut records = parse(SAMPLE);
        let index = position(&records, &"line-3-a.com".into()).unwrap();
        let mut fields = LineFields::of(&records[index]);
        fields.comment = "# shared".into();
        rewrite(&mut records, index, fields, None);
        assert!(records
            .iter()
            .filter(|r| r.line_number == 3)
            .all(|r| r.comment == "# shared"));
    }

    #[test]
    fn rewrite_ip_with_siblings_moves_to_new_line() {
        let mut records = parse(SAMPLE);
        let index = position(&records, &"line-3-b.com".into()).unwrap();
        let mut fields = LineFields::of(&records[index]);
        fields.ip = "10.0.0.2".into();
        rewrite(&mut records, index, fields, None);

        assert_eq!(records[index].line_number, 4);
        assert_eq!(
            generate(&records),
            "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com\n10.0.0.2 b.com\n"
        );
    }

    #[test]
    fn rewrite_ip_of_lone_record_stays() {
        let mut records = parse(SAMPLE);
        let mut fields = LineFields::of(&records[0]);
        fields.ip = "127.0.0.2".into();
        rewrite(&mut records, 0, fields, None);
        assert_eq!(records[0].line_number, 1);
    }

    #[test]
    fn rewrite_home_rejoins_original_line() {
        let mut records = parse(SAMPLE);
        let index = position(&records, &"line-3-b.com".into()).unwrap();
        let original = LineFields::of(&records[index]);

        let mut moved = original.clone();
        moved.ip = "10.0.0.2".into();
        rewrite(&mut records, index, moved, None);
        rewrite(&mut records, index, original, Some(3));

        assert_eq!(generate(&records), SAMPLE);
    }

    // -----------------------------------------------------------------------
    // restore
    // -----------------------------------------------------------------------

    #[test]
    fn restore_to_vacant_line() {
        let mut records = parse(SAMPLE);
        let removed = remove(&mut records, &ids(&["line-3-a.com", "line-3-b.com"]));
        restore(&mut records, removed);
        assert_eq!(generate(&records), SAMPLE);
    }

    #[test]
    fn restore_comment_beside_hosts_line() {
        let mut records = parse("# head\n10.0.0.1 a.com\n");
        let removed = remove(&mut records, &ids(&["line-1"]));
        // line 1 is taken by a host line in the meantime
        records[0].line_number = 1;
        restore(&mut records, removed);
        assert_eq!(generate(&records), "# head\n10.0.0.1 a.com\n");
    }

    #[test]
    fn restore_to_conflicting_line_moves_to_end() {
        let mut records = parse(SAMPLE);
        let removed = remove(&mut records, &ids(&["line-3-a.com", "line-3-b.com"]));
        records.push(Record::domain(3, "10.9.9.9", "other.com", ""));

        restore(&mut records, removed);
        assert_eq!(
            generate(&records),
            "127.0.0.1 localhost\n# comment\n10.9.9.9 other.com\n10.0.0.1 a.com b.com\n"
        );
    }

    #[test]
    fn restore_second_comment_moves_to_end() {
        let mut records = parse("# one\n");
        let removed = vec![Record::comment_line(1, "# two")];
        restore(&mut records, removed);
        assert_eq!(generate(&records), "# one\n# two\n");
    }

    #[test]
    fn restore_groups_stay_together() {
        let mut records = vec![Record::domain(1, "10.9.9.9", "z.com", "")];
        let removed = vec![
            Record::domain(1, "10.0.0.1", "a.com", ""),
            Record::domain(1, "10.0.0.1", "b.com", ""),
        ];
        restore(&mut records, removed);
        assert_eq!(generate(&records), "10.9.9.9 z.com\n10.0.0.1 a.com b.com\n");
    }
}
