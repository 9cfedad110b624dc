//! The compiled-in roster: crews, their members, and role colors.
//!
//! Everything here is a constant for the process lifetime. Avatar paths are
//! relative to [`IMAGE_BASE`]; [`Member::avatar_url`] joins them.

use serde::Serialize;

/// Static host serving member photos.
pub const IMAGE_BASE: &str = "https://poong-chi.vercel.app/images";

/// Color used for any role missing from [`ROLE_COLORS`].
pub const DEFAULT_ROLE_COLOR: &str = "#64748b";

/// A crew member. `id` is the platform identity, unique across the whole roster,
/// though the same member may appear in more than one crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub avatar: &'static str,
}

impl Member {
    /// Absolute avatar URL. Absolute `avatar` values are returned unchanged.
    pub fn avatar_url(&self) -> String {
        if self.avatar.starts_with("http://") || self.avatar.starts_with("https://") {
            self.avatar.to_string()
        } else {
            format!("{}/{}", IMAGE_BASE, self.avatar)
        }
    }

    /// First character of the display name, used when the avatar fails to load.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// A crew. At most one member is expected to carry `boss_role`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Crew {
    pub name: &'static str,
    pub logo: &'static str,
    /// Founding date, display form only.
    pub since: &'static str,
    pub boss_role: &'static str,
    pub members: &'static [Member],
}

impl Crew {
    /// Index of the first member holding the boss role.
    pub fn boss_index(&self) -> Option<usize> {
        self.members.iter().position(|m| m.role == self.boss_role)
    }
}

pub const fn member(
    name: &'static str,
    id: &'static str,
    role: &'static str,
    avatar: &'static str,
) -> Member {
    Member { id, name, role, avatar }
}

pub static CREWS: &[Crew] = &[
    Crew {
        name: "YB",
        logo: "https://yxl.kr/inf/img/yb_logo_main.webp",
        since: "24.10.01",
        boss_role: "수장",
        members: &[
            member("A-염보성!!", "yuambo", "수장", "yb/yuambo.jpg"),
            member("4s.사테", "hoonykkk", "교수", "yb/hoonykkk.jpg"),
            member("Scan유승계", "scan1014", "교수", "yb/scan1014.jpg"),
            member("전제민", "wjswpalssla1", "교수", "yb/wjswpalssla1.jpg"),
            member("오메틴승도4²", "rlatldgus", "교수", "yb/rlatldgus.jpg"),
            member("뎅크~_~", "dkwkal", "교수", "yb/dkwkal.jpg"),
            member("저라닛", "joey1114", "어드바이저", "yb/joey1114.jpg"),
            member("우리밍_", "kmj05317", "학생", "yb/kmj05317.jpg"),
            member("태영♥", "xodud1898", "학생", "yb/xodud1898.jpg"),
            member("하랑e♥", "candyrang00", "학생", "yb/candyrang00.jpg"),
            member("삐긋지니♥", "son4069", "학생", "yb/son4069.jpg"),
            member("으늘이", "rhakdncjs90", "학생", "yb/rhakdncjs90.jpg"),
            member("임빙지", "dlaalswl22", "학생", "yb/dlaalswl22.jpg"),
            member("히요코", "hiyoko040", "학생", "yb/hiyoko040.jpg"),
            member("한쌕니", "zzonii", "학생", "yb/zzonii.jpg"),
            member("하루묵.", "harumyong", "학생", "yb/harumyong.jpg"),
            member("윤하랑=_=", "xx00uxx", "유스", "yb/xx00uxx.jpg"),
            member("준봇드", "gksdidqksxn", "기타", "yb/gksdidqksxn.jpg"),
            member("임아니", "1004suna", "기타", "yb/1004suna.jpg"),
        ],
    },
    Crew {
        name: "YXL",
        logo: "https://yxl.kr/inf/img/yxl_logo_main.webp",
        since: "24.04.01",
        boss_role: "대표",
        members: &[
            member("A-염보성!!", "yuambo", "대표", "yxl/yuambo.jpg"),
            member("리윤_♥", "sladk51", "부장", "yxl/sladk51.jpg"),
            member("후육♥", "jaeha010", "차장", "yxl/jaeha010.jpg"),
            member("서니_♥", "iluvpp", "과장", "yxl/iluvpp.jpg"),
            member("하랍쌍♥", "asy1218", "대리", "yxl/asy1218.jpg"),
            member("소다♥", "zbxlzzz", "비서실장", "yxl/zbxlzzz.jpg"),
            member("#율무", "offside629", "주임", "yxl/offside629.jpg"),
            member("김유정S2", "tkek55", "사원", "yxl/tkek55.jpg"),
            member("꺼니", "callgg", "웨이터", "yxl/callgg.jpg"),
            member("김푸:)", "kimpooh0707", "웨이터", "yxl/kimpooh0707.jpg"),
            member("유나연♡", "jeewon1202", "시급", "yxl/jeewon1202.jpg"),
            member("뭉뭉수주", "star49", "신입", "yxl/star49.jpg"),
            member("미로。", "fhwm0602", "신입", "yxl/fhwm0602.jpg"),
            member("넘서하♡", "smkim82372", "신입", "yxl/smkim82372.jpg"),
        ],
    },
];

pub static ROLE_COLORS: &[(&str, &str)] = &[
    ("수장", "#dc2626"),
    ("대표", "#dc2626"),
    ("교수", "#7c3aed"),
    ("부장", "#7c3aed"),
    ("차장", "#9333ea"),
    ("과장", "#a855f7"),
    ("어드바이저", "#ea580c"),
    ("비서실장", "#ea580c"),
    ("대리", "#f97316"),
    ("주임", "#fb923c"),
    ("사원", "#2563eb"),
    ("웨이터", "#3b82f6"),
    ("시급", "#60a5fa"),
    ("학생", "#2563eb"),
    ("유스", "#059669"),
    ("신입", "#059669"),
    ("기타", "#64748b"),
];

/// Display color for a role label.
pub fn role_color(role: &str) -> &'static str {
    ROLE_COLORS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_ROLE_COLOR)
}
