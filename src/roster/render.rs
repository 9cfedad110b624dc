//! Board rendering.
//!
//! `render` is a pure function of the crews and a live snapshot. It first
//! builds a view model ([`CrewView`]) that fixes the boss slot and grid order,
//! then emits the whole markup subtree as one string. Callers replace the
//! mounted subtree wholesale with the result; nothing is diffed.

use crate::roster::data::{role_color, Crew, Member};
use crate::roster::live::{LiveStatus, LiveTable};

/// Base of the canonical member profile URL.
pub const PROFILE_BASE: &str = "https://www.sooplive.co.kr";

/// Link to the full live version of the board, shown in the footer.
pub const FULL_BOARD_URL: &str = "https://poong-chi.vercel.app/";

/// A member paired with its live overlay, if any.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a> {
    pub member: &'a Member,
    pub live: Option<&'a LiveStatus>,
}

impl MemberView<'_> {
    pub fn is_live(&self) -> bool {
        self.live.map(|s| s.is_live).unwrap_or(false)
    }

    pub fn profile_url(&self) -> String {
        format!("{}/{}", PROFILE_BASE, self.member.id)
    }
}

/// One crew section, ordered for display.
#[derive(Debug, Clone)]
pub struct CrewView<'a> {
    pub crew: &'a Crew,
    pub boss: Option<MemberView<'a>>,
    /// Everyone except the boss, live members first, declaration order otherwise.
    pub grid: Vec<MemberView<'a>>,
    pub live_count: usize,
}

/// Build the display model for every crew.
pub fn build_view<'a>(crews: &'a [Crew], live: &'a LiveTable) -> Vec<CrewView<'a>> {
    crews
        .iter()
        .map(|crew| {
            let view_of = |member: &'a Member| MemberView {
                member,
                live: live.get(member.id),
            };
            let boss_index = crew.boss_index();

            let mut grid: Vec<_> = crew
                .members
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != boss_index)
                .map(|(_, m)| view_of(m))
                .collect();
            // Stable: ties keep declaration order.
            grid.sort_by_key(|v| !v.is_live());

            CrewView {
                crew,
                boss: boss_index.map(|i| view_of(&crew.members[i])),
                grid,
                live_count: crew.members.iter().filter(|m| live.is_live(m.id)).count(),
            }
        })
        .collect()
}

/// Render the board subtree for `crews` under the given live snapshot.
pub fn render(crews: &[Crew], live: &LiveTable) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(STYLE);
    for view in build_view(crews, live) {
        push_crew(&mut out, &view);
    }
    out.push_str(&format!(
        "<div class=\"cr-footer\">{} 크루 현황판 · <a href=\"{}\" target=\"_blank\" rel=\"noopener\">실시간 버전 바로가기</a></div>",
        escape(&crew_names(crews)),
        FULL_BOARD_URL
    ));
    out
}

/// Wrap rendered markup in a standalone document with the `app-root` mount.
pub fn page(markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>크루 현황판</title>\n</head>\n<body>\n<div id=\"app-root\">{}</div>\n</body>\n</html>\n",
        markup
    )
}

fn crew_names(crews: &[Crew]) -> String {
    crews.iter().map(|c| c.name).collect::<Vec<_>>().join("/")
}

fn push_crew(out: &mut String, view: &CrewView<'_>) {
    let crew = view.crew;
    out.push_str("<div class=\"cr-section\">");

    out.push_str(&format!(
        "<div class=\"cr-header\"><div class=\"cr-logo\"><img src=\"{}\" alt=\"\" onerror=\"this.style.display='none'\"></div><div><div class=\"cr-name\">{}</div><div class=\"cr-since\">SINCE {}</div></div>",
        escape(crew.logo),
        escape(crew.name),
        escape(crew.since)
    ));
    if view.live_count > 0 {
        out.push_str(&format!(
            "<div class=\"cr-live-count\">🔴 LIVE {}명</div>",
            view.live_count
        ));
    }
    out.push_str("</div>");

    out.push_str(&format!(
        "<div class=\"cr-summary\">총원 <b>{}명</b></div>",
        crew.members.len()
    ));

    if let Some(boss) = &view.boss {
        push_boss(out, boss);
    }

    out.push_str("<div class=\"members\">");
    for member in &view.grid {
        push_member(out, member);
    }
    out.push_str("</div></div>");
}

fn push_boss(out: &mut String, view: &MemberView<'_>) {
    let m = view.member;
    out.push_str(&format!(
        "<a class=\"cr-boss\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><div class=\"boss-ph-wrap\">",
        escape(&view.profile_url())
    ));
    push_avatar(out, "boss-ph", view);
    out.push_str(&format!(
        "</div><div><span class=\"badge\" style=\"background:{}\">{}</span><div class=\"boss-nm\">{}</div>",
        role_color(m.role),
        escape(m.role),
        escape(m.name)
    ));
    if let Some(status) = view.live.filter(|s| s.is_live) {
        out.push_str(&format!(
            "<div class=\"live-title\">{}</div>",
            escape(&status.title)
        ));
    }
    out.push_str("</div></a>");
}

fn push_member(out: &mut String, view: &MemberView<'_>) {
    let m = view.member;
    out.push_str(&format!(
        "<a class=\"mem\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><div class=\"mem-ph-wrap\">",
        escape(&view.profile_url())
    ));
    push_avatar(out, "mem-ph", view);
    out.push_str(&format!(
        "</div><span class=\"badge\" style=\"background:{}\">{}</span><span class=\"mem-nm\">{}</span></a>",
        role_color(m.role),
        escape(m.role),
        escape(m.name)
    ));
}

/// Photo frame with a letter placeholder revealed only when the image fails to load.
fn push_avatar(out: &mut String, class: &str, view: &MemberView<'_>) {
    let m = view.member;
    let ring = if view.is_live() { " live-ring" } else { "" };
    out.push_str(&format!(
        "<div class=\"{}{}\"><img src=\"{}\" alt=\"{}\" onerror=\"this.hidden=true;this.nextElementSibling.hidden=false\"><div class=\"ph-fallback\" hidden>{}</div></div>",
        class,
        ring,
        escape(&m.avatar_url()),
        escape(m.name),
        escape(&m.initial().to_string())
    ));
    if view.is_live() {
        out.push_str("<span class=\"live-tag\">LIVE</span>");
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"<style>
#app-root { font-family:'Noto Sans KR',sans-serif; max-width:900px; margin:0 auto; background:#0f1117; color:#e2e8f0; padding:20px; border-radius:12px; }
#app-root * { box-sizing:border-box; margin:0; padding:0; }
.cr-section { margin-bottom:36px; }
.cr-header { display:flex; align-items:center; gap:14px; margin-bottom:14px; flex-wrap:wrap; }
.cr-logo { width:56px; height:56px; border-radius:50%; background:linear-gradient(135deg,#d97706,#b45309); padding:3px; }
.cr-logo img { width:100%; height:100%; object-fit:contain; border-radius:50%; }
.cr-name { font-size:22px; font-weight:900; }
.cr-since { font-size:11px; color:#d97706; font-weight:600; }
.cr-live-count { background:#450a0a; border:1px solid rgba(239,68,68,0.25); border-radius:16px; padding:3px 10px; font-size:11px; font-weight:700; color:#ef4444; margin-left:auto; }
.cr-summary { font-size:13px; color:#94a3b8; padding:10px 0; border-bottom:1px solid #2a2d3a; margin-bottom:14px; }
.cr-summary b { color:#e2e8f0; }
.cr-boss { display:flex; align-items:center; gap:14px; padding:16px 0; border-bottom:1px solid #2a2d3a; margin-bottom:16px; text-decoration:none; color:inherit; }
.boss-ph-wrap, .mem-ph-wrap { position:relative; flex-shrink:0; }
.boss-ph { width:72px; height:72px; border-radius:50%; border:3px solid #f59e0b; overflow:hidden; background:#252836; box-shadow:0 0 0 3px rgba(245,158,11,0.2); }
.boss-nm { font-size:17px; font-weight:800; }
.badge { display:inline-block; padding:2px 8px; border-radius:10px; font-size:11px; font-weight:700; color:#fff; margin-bottom:2px; }
.members { display:grid; grid-template-columns:repeat(auto-fill,minmax(85px,1fr)); gap:16px 10px; }
.mem { display:flex; flex-direction:column; align-items:center; gap:3px; text-decoration:none; color:inherit; transition:transform .15s; }
.mem:hover { transform:translateY(-2px); }
.mem-ph { width:66px; height:66px; border-radius:50%; border:2px solid #2a2d3a; overflow:hidden; background:#252836; transition:border-color .15s; }
.mem:hover .mem-ph, .cr-boss:hover .boss-ph { border-color:#f59e0b; }
.boss-ph img, .mem-ph img { width:100%; height:100%; object-fit:cover; }
.ph-fallback { display:flex; align-items:center; justify-content:center; width:100%; height:100%; font-size:18px; color:#64748b; background:#252836; }
.ph-fallback[hidden], .boss-ph img[hidden], .mem-ph img[hidden] { display:none; }
.mem-nm { font-size:12px; font-weight:700; text-align:center; max-width:85px; overflow:hidden; text-overflow:ellipsis; white-space:nowrap; }
.live-ring { border:3px solid #ef4444 !important; box-shadow:0 0 0 3px rgba(239,68,68,0.3),0 0 12px rgba(239,68,68,0.2); animation:lglow 2s ease-in-out infinite; }
@keyframes lglow { 0%,100%{box-shadow:0 0 0 3px rgba(239,68,68,0.3),0 0 12px rgba(239,68,68,0.2)} 50%{box-shadow:0 0 0 3px rgba(239,68,68,0.5),0 0 20px rgba(239,68,68,0.3)} }
.live-tag { position:absolute; bottom:-2px; left:50%; transform:translateX(-50%); background:#ef4444; color:#fff; font-size:8px; font-weight:800; padding:1px 5px; border-radius:6px; letter-spacing:.5px; }
.live-title { font-size:11px; color:#64748b; max-width:280px; overflow:hidden; text-overflow:ellipsis; white-space:nowrap; }
.cr-footer { text-align:center; font-size:10px; color:#64748b; padding-top:16px; border-top:1px solid #2a2d3a; margin-top:10px; }
.cr-footer a { color:#d97706; text-decoration:none; }
</style>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::data::{member, CREWS};

    const BOSS: Member = member("Boss", "boss1", "chief", "boss.jpg");
    const M1: Member = member("First", "m1", "crew", "m1.jpg");
    const M2: Member = member("Second", "m2", "crew", "m2.jpg");
    const M3: Member = member("<Third>", "m3", "crew", "m3.jpg");

    static CREW: &[Crew] = &[Crew {
        name: "Test",
        logo: "logo.png",
        since: "24.01.01",
        boss_role: "chief",
        members: &[BOSS, M1, M2, M3],
    }];

    static HEADLESS: &[Crew] = &[Crew {
        name: "Headless",
        logo: "logo.png",
        since: "24.01.01",
        boss_role: "chief",
        members: &[M1, M2],
    }];

    fn live(ids: &[(&str, &str)]) -> LiveTable {
        let mut table = LiveTable::new();
        for (id, title) in ids {
            table.insert(
                *id,
                LiveStatus {
                    is_live: true,
                    title: title.to_string(),
                    viewer_count: 3,
                },
            );
        }
        table
    }

    fn grid_ids(view: &CrewView<'_>) -> Vec<&'static str> {
        view.grid.iter().map(|v| v.member.id).collect()
    }

    #[test]
    fn offline_grid_keeps_declaration_order() {
        let table = LiveTable::new();
        let views = build_view(CREW, &table);
        assert_eq!(views[0].boss.unwrap().member.id, "boss1");
        assert_eq!(grid_ids(&views[0]), vec!["m1", "m2", "m3"]);
        assert_eq!(views[0].live_count, 0);
    }

    #[test]
    fn live_member_moves_to_front() {
        let table = live(&[("m2", "stream")]);
        let views = build_view(CREW, &table);
        assert_eq!(grid_ids(&views[0]), vec!["m2", "m1", "m3"]);
        assert_eq!(views[0].live_count, 1);

        let html = render(CREW, &table);
        assert!(html.contains("🔴 LIVE 1명"));
    }

    #[test]
    fn live_sort_is_stable() {
        let table = live(&[("m3", ""), ("m2", "")]);
        let views = build_view(CREW, &table);
        assert_eq!(grid_ids(&views[0]), vec!["m2", "m3", "m1"]);
    }

    #[test]
    fn missing_boss_omits_slot() {
        let table = LiveTable::new();
        let views = build_view(HEADLESS, &table);
        assert!(views[0].boss.is_none());
        assert_eq!(grid_ids(&views[0]), vec!["m1", "m2"]);

        let html = render(HEADLESS, &table);
        assert!(!html.contains("class=\"cr-boss\""));
        assert_eq!(html.matches("class=\"mem\"").count(), 2);
    }

    #[test]
    fn no_badge_when_nobody_is_live() {
        let html = render(CREW, &LiveTable::new());
        assert!(!html.contains("cr-live-count"));
        assert!(!html.contains("live-ring"));
        assert!(!html.contains("live-tag"));
    }

    #[test]
    fn boss_shows_title_but_grid_does_not() {
        let table = live(&[("boss1", "boss stream"), ("m1", "member stream")]);
        let html = render(CREW, &table);
        assert!(html.contains("<div class=\"live-title\">boss stream</div>"));
        assert!(!html.contains("member stream"));
        assert_eq!(html.matches("<span class=\"live-tag\">LIVE</span>").count(), 2);
        assert!(html.contains("🔴 LIVE 2명"));
    }

    #[test]
    fn text_is_escaped() {
        let table = live(&[("boss1", "<script>alert(1)</script>")]);
        let html = render(CREW, &table);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;Third&gt;"));
    }

    #[test]
    fn avatars_link_to_profiles_with_letter_fallback() {
        let html = render(CREW, &LiveTable::new());
        assert!(html.contains("href=\"https://www.sooplive.co.kr/m1\""));
        assert!(html.contains("<div class=\"ph-fallback\" hidden>F</div>"));
        assert!(html.contains("onerror=\"this.hidden=true;this.nextElementSibling.hidden=false\""));
    }

    #[test]
    fn render_is_idempotent() {
        let table = live(&[("yuambo", "t"), ("sladk51", "u")]);
        assert_eq!(render(CREWS, &table), render(CREWS, &table));
    }

    #[test]
    fn shared_member_counts_in_each_crew() {
        let table = live(&[("yuambo", "t")]);
        let views = build_view(CREWS, &table);
        assert!(views.iter().all(|v| v.live_count == 1));
        assert!(views.iter().all(|v| v.boss.unwrap().is_live()));
    }
}
