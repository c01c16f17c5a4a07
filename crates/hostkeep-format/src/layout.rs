//! Records to physical lines.
//!
//! [`layout`] decides the exact line sequence the generator emits; rendering
//! and id remapping are both derived from that one sequence so they can never
//! disagree about where a record ends up.

use std::collections::BTreeMap;

use hostkeep_types::{Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::normalize_comment;

/// Line terminator used when rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The platform's conventional terminator.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

/// One physical output line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutLine {
    /// A standalone comment line.
    Comment { source: RecordId, text: String },
    /// `<ip> <domain>... [comment]`
    Hosts {
        ip: String,
        domains: Vec<(RecordId, String)>,
        comment: String,
    },
}

impl LayoutLine {
    /// Rendered text without a terminator.
    pub fn text(&self) -> String {
        match self {
            Self::Comment { text, .. } => text.clone(),
            Self::Hosts {
                ip,
                domains,
                comment,
            } => {
                let mut line = ip.clone();
                for (_, domain) in domains {
                    line.push(' ');
                    line.push_str(domain);
                }
                if !comment.is_empty() {
                    line.push(' ');
                    line.push_str(comment);
                }
                line
            }
        }
    }
}

/// Mapping from the id a record had when handed to the generator to the id
/// it carries once the generated text is parsed again.
///
/// Records whose `(line_number, domain)` pair collides inside one input
/// collapse onto one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdMap {
    entries: BTreeMap<RecordId, RecordId>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: RecordId, to: RecordId) {
        self.entries.insert(from, to);
    }

    pub fn get(&self, id: &RecordId) -> Option<&RecordId> {
        self.entries.get(id)
    }

    /// The mapped id, or `id` itself when it is not part of the map.
    pub fn resolve(&self, id: &RecordId) -> RecordId {
        self.get(id).cloned().unwrap_or_else(|| id.clone())
    }

    /// Rewrite `id` in place if the map knows it.
    pub fn remap(&self, id: &mut RecordId) {
        if let Some(to) = self.entries.get(id) {
            *id = to.clone();
        }
    }

    /// Returns `true` if every entry maps an id onto itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|(from, to)| from == to)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, &RecordId)> {
        self.entries.iter()
    }
}

/// The ordered physical lines for a record set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    lines: Vec<LayoutLine>,
}

#[derive(Default)]
struct LineGroup<'a> {
    comments: Vec<&'a Record>,
    hosts: Vec<&'a Record>,
}

/// Lay records out as physical lines.
///
/// Records are grouped by `line_number` and groups are emitted in ascending
/// order. Within a group, comment-only records come first, then one hosts
/// line using the ip of the first domain record, every member domain in
/// encounter order, and the first non-empty trailing comment. Groups with
/// neither produce nothing.
pub fn layout(records: &[Record]) -> Layout {
    let mut groups: BTreeMap<u32, LineGroup<'_>> = BTreeMap::new();
    for record in records {
        let group = groups.entry(record.line_number).or_default();
        if record.is_comment {
            group.comments.push(record);
        } else if !record.domain.is_empty() {
            group.hosts.push(record);
        }
    }

    let mut lines = Vec::new();
    for group in groups.into_values() {
        for record in group.comments {
            // one physical line per comment record
            let text = normalize_comment(&record.comment.replace(['\r', '\n'], " "));
            if text.is_empty() {
                continue;
            }
            lines.push(LayoutLine::Comment {
                source: record.id.clone(),
                text,
            });
        }

        let Some(first) = group.hosts.first() else {
            continue;
        };
        let comment = group
            .hosts
            .iter()
            .map(|r| r.comment.as_str())
            .find(|c| !c.trim().is_empty())
            .map(|c| {
                normalize_comment(c)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        lines.push(LayoutLine::Hosts {
            ip: first.ip.clone(),
            domains: group
                .hosts
                .iter()
                .map(|r| (r.id.clone(), r.domain.clone()))
                .collect(),
            comment,
        });
    }

    Layout { lines }
}

impl Layout {
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render every line, each followed by `ending`.
    pub fn render(&self, ending: LineEnding) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text());
            out.push_str(ending.as_str());
        }
        out
    }

    /// Where every laid-out record lands on the next parse.
    pub fn id_map(&self) -> IdMap {
        let mut map = IdMap::new();
        for (line_number, line) in self.numbered() {
            match line {
                LayoutLine::Comment { source, .. } => {
                    map.insert(source.clone(), RecordId::for_comment(line_number));
                }
                LayoutLine::Hosts { domains, .. } => {
                    for (source, domain) in domains {
                        map.insert(source.clone(), RecordId::for_domain(line_number, domain));
                    }
                }
            }
        }
        map
    }

    /// The records a parse of the rendered text yields.
    pub fn persisted_records(&self) -> Vec<Record> {
        let mut records = Vec::new();
        for (line_number, line) in self.numbered() {
            match line {
                LayoutLine::Comment { text, .. } => {
                    records.push(Record::comment_line(line_number, text.clone()));
                }
                LayoutLine::Hosts {
                    ip,
                    domains,
                    comment,
                } => {
                    for (_, domain) in domains {
                        records.push(Record::domain(line_number, ip, domain, comment.clone()));
                    }
                }
            }
        }
        records
    }

    fn numbered(&self) -> impl Iterator<Item = (u32, &LayoutLine)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index as u32 + 1, line))
    }
}

/// Regenerate hosts text with `\n` terminators.
pub fn generate(records: &[Record]) -> String {
    generate_with(records, LineEnding::Lf)
}

/// Regenerate hosts text with the given terminator.
pub fn generate_with(records: &[Record], ending: LineEnding) -> String {
    layout(records).render(ending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use proptest::prelude::*;

    const SAMPLE: &str = "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com b.com\n";

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    #[test]
    fn regenerates_sample() {
        assert_eq!(generate(&parse(SAMPLE)), SAMPLE);
    }

    #[test]
    fn appended_record_lands_on_last_line() {
        let mut records = parse(SAMPLE);
        records.push(Record::domain(4, "1.2.3.4", "x.com", ""));
        assert_eq!(
            generate(&records),
            "127.0.0.1 localhost\n# comment\n10.0.0.1 a.com b.com\n1.2.3.4 x.com\n"
        );
    }

    #[test]
    fn blank_lines_are_not_reproduced() {
        let text = "127.0.0.1 localhost\n\n\n# c\n";
        assert_eq!(generate(&parse(text)), "127.0.0.1 localhost\n# c\n");
    }

    #[test]
    fn groups_sort_by_line_number() {
        let records = vec![
            Record::domain(9, "10.0.0.9", "z.com", ""),
            Record::comment_line(2, "# two"),
            Record::domain(5, "10.0.0.5", "m.com", ""),
        ];
        assert_eq!(generate(&records), "# two\n10.0.0.5 m.com\n10.0.0.9 z.com\n");
    }

    #[test]
    fn trailing_comment_is_kept() {
        let text = "10.0.0.1 a.com b.com # dev boxes\n";
        assert_eq!(generate(&parse(text)), text);
    }

    #[test]
    fn comment_group_emits_comment_before_hosts() {
        let records = vec![
            Record::domain(3, "10.0.0.1", "a.com", ""),
            Record::comment_line(3, "# restored"),
        ];
        assert_eq!(generate(&records), "# restored\n10.0.0.1 a.com\n");
    }

    #[test]
    fn first_domain_ip_wins() {
        let records = vec![
            Record::domain(1, "10.0.0.1", "a.com", ""),
            Record::domain(1, "10.0.0.2", "b.com", ""),
        ];
        assert_eq!(generate(&records), "10.0.0.1 a.com b.com\n");
    }

    #[test]
    fn empty_comment_record_emits_nothing() {
        let records = vec![Record::comment_line(1, "")];
        assert_eq!(generate(&records), "");
    }

    #[test]
    fn comment_line_never_spans_lines() {
        let records = vec![
            Record::domain(1, "10.0.0.1", "a.com", ""),
            Record::comment_line(2, "# note\n6.6.6.6 injected.com\r"),
        ];
        let text = generate(&records);
        assert_eq!(text, "10.0.0.1 a.com\n# note 6.6.6.6 injected.com\n");
        assert_eq!(layout(&records).persisted_records(), parse(&text));
    }

    #[test]
    fn unmarked_comment_is_normalized() {
        let mut record = Record::domain(1, "10.0.0.1", "a.com", "");
        record.comment = "note".into();
        assert_eq!(generate(&[record]), "10.0.0.1 a.com # note\n");
    }

    #[test]
    fn crlf_rendering() {
        let records = parse(SAMPLE);
        assert_eq!(
            generate_with(&records, LineEnding::CrLf),
            "127.0.0.1 localhost\r\n# comment\r\n10.0.0.1 a.com b.com\r\n"
        );
    }

    #[test]
    fn empty_record_set_renders_empty() {
        assert_eq!(generate(&[]), "");
        assert!(layout(&[]).is_empty());
    }

    #[test]
    fn line_ending_strings() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }

    // -----------------------------------------------------------------------
    // Id remapping
    // -----------------------------------------------------------------------

    #[test]
    fn id_map_follows_blank_line_compaction() {
        let records = parse("127.0.0.1 localhost\n\n10.0.0.1 a.com\n");
        let map = layout(&records).id_map();
        assert_eq!(
            map.resolve(&RecordId::from("line-3-a.com")),
            RecordId::from("line-2-a.com")
        );
        assert!(!map.is_identity());
    }

    #[test]
    fn id_map_for_minted_record() {
        let mut records = parse(SAMPLE);
        let mut fresh = Record::domain(4, "1.2.3.4", "x.com", "");
        fresh.id = RecordId::minted(1);
        records.push(fresh);

        let map = layout(&records).id_map();
        assert_eq!(
            map.get(&RecordId::minted(1)),
            Some(&RecordId::from("line-4-x.com"))
        );
    }

    #[test]
    fn id_map_of_normalized_file_is_identity() {
        let map = layout(&parse(SAMPLE)).id_map();
        assert_eq!(map.len(), 4);
        assert!(map.is_identity());
    }

    #[test]
    fn resolve_unknown_id_is_unchanged() {
        let map = IdMap::new();
        let id = RecordId::from("line-7");
        assert_eq!(map.resolve(&id), id);

        let mut id = RecordId::from("line-7");
        map.remap(&mut id);
        assert_eq!(id.as_str(), "line-7");
    }

    #[test]
    fn persisted_records_for_mixed_group() {
        let records = vec![
            Record::domain(3, "10.0.0.1", "a.com", ""),
            Record::comment_line(3, "# restored"),
        ];
        let persisted = layout(&records).persisted_records();
        assert_eq!(persisted, parse(&generate(&records)));
        assert_eq!(persisted[0], Record::comment_line(1, "# restored"));
        assert_eq!(persisted[1].line_number, 2);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[derive(Clone, Debug)]
    enum LineShape {
        Comment(String),
        Hosts {
            ip: String,
            domains: Vec<String>,
            comment: Option<String>,
        },
    }

    fn line_shape() -> impl Strategy<Value = LineShape> {
        let comment = "#[a-z]{0,8}( [a-z]{1,5}){0,2}".prop_map(LineShape::Comment);
        let hosts = (
            "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
            prop::collection::btree_set("[a-z][a-z0-9.-]{0,8}", 1..4),
            prop::option::of("[a-z]{1,6}( [a-z]{1,4})?"),
        )
            .prop_map(|(ip, domains, comment)| LineShape::Hosts {
                ip,
                domains: domains.into_iter().collect(),
                comment,
            });
        prop_oneof![comment, hosts]
    }

    fn build(shapes: &[LineShape], stride: u32) -> Vec<Record> {
        let mut records = Vec::new();
        for (index, shape) in shapes.iter().enumerate() {
            let line_number = (index as u32 + 1) * stride;
            match shape {
                LineShape::Comment(text) => records.push(Record::comment_line(line_number, text.clone())),
                LineShape::Hosts {
                    ip,
                    domains,
                    comment,
                } => {
                    let comment = comment.as_ref().map(|c| format!("# {c}")).unwrap_or_default();
                    for domain in domains {
                        records.push(Record::domain(line_number, ip, domain, comment.clone()));
                    }
                }
            }
        }
        records
    }

    proptest! {
        #[test]
        fn parse_inverts_generate_for_normalized_records(
            shapes in prop::collection::vec(line_shape(), 0..12)
        ) {
            let records = build(&shapes, 1);
            prop_assert_eq!(parse(&generate(&records)), records);
        }

        #[test]
        fn regeneration_is_idempotent(
            records in prop::collection::vec(line_shape(), 0..12)
                .prop_map(|shapes| build(&shapes, 3))
                .prop_shuffle()
        ) {
            let once = generate(&records);
            prop_assert_eq!(generate(&parse(&once)), once);
        }

        #[test]
        fn layout_predicts_the_next_parse(
            records in prop::collection::vec(line_shape(), 0..12)
                .prop_map(|shapes| build(&shapes, 2))
                .prop_shuffle()
        ) {
            let laid_out = layout(&records);
            let reparsed = parse(&laid_out.render(LineEnding::Lf));
            prop_assert_eq!(&laid_out.persisted_records(), &reparsed);

            let map = laid_out.id_map();
            for record in &records {
                let mapped = map.resolve(&record.id);
                prop_assert!(reparsed.iter().any(|r| r.id == mapped));
            }
        }
    }
}
