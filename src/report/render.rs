use crate::report::ReportOptions;
use crate::report::join::ResolvedPitcher;
use mlb_api::StatcastStatus;
use std::collections::HashMap;
use std::fmt::Write;

const SPACER: &str = "&nbsp;<br>";

/// Groups render in this order; anything else (Cancelled) follows.
const GROUP_ORDER: [GroupKey; 4] = [
    GroupKey { statcast: StatcastStatus::StatcastGames, on_tv: true },
    GroupKey { statcast: StatcastStatus::StatcastGames, on_tv: false },
    GroupKey { statcast: StatcastStatus::NoStatcast, on_tv: true },
    GroupKey { statcast: StatcastStatus::NoStatcast, on_tv: false },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub statcast: StatcastStatus,
    pub on_tv: bool,
}

impl GroupKey {
    fn of(row: &ResolvedPitcher) -> Self {
        Self { statcast: row.appearance.statcast, on_tv: row.on_tv }
    }

    /// Position in the rendered report. Keys outside `GROUP_ORDER` sort
    /// after it, TV before no-TV.
    pub fn rank(&self) -> usize {
        GROUP_ORDER
            .iter()
            .position(|k| k == self)
            .unwrap_or(GROUP_ORDER.len() + usize::from(!self.on_tv))
    }

    pub fn title(&self) -> String {
        let tv = if self.on_tv { "TV" } else { "No TV" };
        format!("{} - {tv}", self.statcast.label())
    }

    pub fn color(&self) -> &'static str {
        match (self.statcast, self.on_tv) {
            (StatcastStatus::StatcastGames, true) => "#3366ff",
            (StatcastStatus::StatcastGames, false) => "#339966",
            (StatcastStatus::NoStatcast, true) => "#cf5606",
            (StatcastStatus::NoStatcast, false) => "#940a0a",
            (StatcastStatus::Cancelled, _) => "#7f7f7f",
        }
    }

    pub fn heading(&self) -> String {
        format!(
            r#"<span style="font-size: 20pt; color: {};"><strong>{}</strong></span>"#,
            self.color(),
            self.title()
        )
    }
}

#[derive(Debug)]
pub struct ReportGroup<'a> {
    pub key: GroupKey,
    pub members: Vec<&'a ResolvedPitcher>,
    /// Distinct matchups in first-seen order.
    pub game_infos: Vec<&'a str>,
}

/// Partition rows by (Statcast status, on TV), keeping row order inside each
/// group, and order the groups by [`GroupKey::rank`].
pub fn group_rows(rows: &[ResolvedPitcher]) -> Vec<ReportGroup<'_>> {
    let mut groups: Vec<ReportGroup<'_>> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for row in rows {
        let key = GroupKey::of(row);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(ReportGroup { key, members: Vec::new(), game_infos: Vec::new() });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.members.push(row);
        let game_info = row.appearance.game_info.as_str();
        if !group.game_infos.contains(&game_info) {
            group.game_infos.push(game_info);
        }
    }

    groups.sort_by_key(|g| g.key.rank());
    groups
}

pub fn render_report(rows: &[ResolvedPitcher], options: ReportOptions) -> String {
    let mut out = String::new();
    for group in group_rows(rows) {
        render_group(&mut out, &group, options);
    }
    out
}

fn render_group(out: &mut String, group: &ReportGroup<'_>, options: ReportOptions) {
    out.push_str(&group.key.heading());
    out.push_str("<br><br>");

    for game_info in &group.game_infos {
        let _ = write!(out, "{game_info}<br>{SPACER}");
    }
    out.push_str(SPACER);

    for row in &group.members {
        out.push_str(&pitcher_line(row, options));
        out.push_str("<br>");
        out.push_str(SPACER);
    }
    out.push_str(SPACER);
    out.push_str("<br>");
}

/// `<strong>Name (TEAM) - IP, ER, H, BB, K.</strong>`
pub fn pitcher_line(row: &ResolvedPitcher, options: ReportOptions) -> String {
    let line = &row.appearance.line;
    let stats = [
        (&line.ip, "IP"),
        (&line.er, "ER"),
        (&line.h, "H"),
        (&line.bb, "BB"),
        (&line.k, "K"),
    ]
    .iter()
    .map(|(value, label)| {
        if options.stat_labels {
            format!("{value} {label}")
        } else {
            value.to_string()
        }
    })
    .collect::<Vec<_>>()
    .join(", ");

    format!(
        "<strong>{} ({}) - {stats}.</strong>",
        row.full_name, row.appearance.team
    )
}
