//! Static page content. Everything here is fixed at compile time and only
//! ever read.

use chrono::NaiveDate;
use url::Url;

use crate::media::avatar::AvatarChain;

pub const DATE_FORMAT: &str = "%Y.%m.%d";

pub const BANNER_IMAGE: &str = "/assets/banner.webp";
pub const NEWS_IMAGE: &str = "/assets/news.webp";

/// Roster side images, preloaded before the roster animates.
pub static SIDE_IMAGES: [&str; 2] = ["/assets/Pose3.webp", "/assets/Picture1.webp"];

/// Whether `href` parses as an absolute URL.
pub fn is_well_formed(href: &str) -> bool {
    Url::parse(href).is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditEntry {
    pub name: &'static str,
    pub role: Option<&'static str>,
    pub handle: &'static str,
    pub profile_url: &'static str,
    /// Used when the handle lookup fails.
    pub avatar_url: Option<&'static str>,
}

impl CreditEntry {
    const fn new(name: &'static str, role: Option<&'static str>, handle: &'static str, profile_url: &'static str) -> Self {
        Self {
            name,
            role,
            handle,
            profile_url,
            avatar_url: None,
        }
    }

    const fn with_avatar(self, avatar_url: &'static str) -> Self {
        Self {
            avatar_url: Some(avatar_url),
            ..self
        }
    }

    pub fn avatar(&self, size: u32) -> AvatarChain {
        AvatarChain::new(self.handle, self.avatar_url, size)
    }
}

pub static ORGANIZERS: [CreditEntry; 2] = [
    CreditEntry::new("噗哩噗哩", Some("策劃"), "puripuri0621", "https://x.com/puripuri0621"),
    CreditEntry::new("菲尼斯", Some("策劃"), "phenix_dc", "https://x.com/phenix_dc"),
];

pub static STAFF: [CreditEntry; 6] = [
    CreditEntry::new("瑋B", Some("主繪師"), "WeiB_artist", "https://x.com/WeiB_artist"),
    CreditEntry::new("丕嗣", Some("插圖繪師"), "haskyyyyy1", "https://x.com/haskyyyyy1"),
    CreditEntry::new("泡泡", Some("插圖繪師"), "h_bubble93", "https://x.com/h_bubble93"),
    CreditEntry::new("小鶴", Some("Live2D"), "hehebirdhechi", "https://x.com/hehebirdhechi"),
    CreditEntry::new("Jeffery 簡佛瑞", Some("剪輯師"), "Jeffery1163", "https://x.com/Jeffery1163"),
    CreditEntry::new("熊熊", Some("網頁設計"), "rxbear0627", "https://x.com/rxbear0627")
        .with_avatar("https://pbs.twimg.com/profile_images/1921233359126360067/45ueaxMr_400x400.jpg"),
];

pub static SPONSORS: [CreditEntry; 12] = [
    CreditEntry::new("噗哩噗哩", None, "puripuri0621", "https://x.com/puripuri0621"),
    CreditEntry::new("菲尼斯", None, "phenix_dc", "https://x.com/phenix_dc"),
    CreditEntry::new("夕陽", None, "lQigor1WqQ6hbPU", "https://x.com/lQigor1WqQ6hbPU")
        .with_avatar("https://pbs.twimg.com/profile_images/1595799152604377089/NL-QI23d_400x400.jpg"),
    CreditEntry::new("Ash Huang 公館快打", None, "HuangAsh", "https://x.com/HuangAsh"),
    CreditEntry::new("ミーアキャット", None, "mi_akyatto0304", "https://x.com/mi_akyatto0304"),
    CreditEntry::new("蘋", None, "liyue89050361", "https://x.com/liyue89050361"),
    CreditEntry::new("友熙", None, "tingxuan0203", "https://x.com/tingxuan0203"),
    CreditEntry::new("刀斧怪", None, "xCOJ1R77ixAPVlo", "https://x.com/xCOJ1R77ixAPVlo"),
    CreditEntry::new("奧煞", None, "Eric6iB", "https://x.com/Eric6iB"),
    CreditEntry::new("閃電流氓", None, "Hunga86", "https://x.com/Hunga86"),
    CreditEntry::new("歐咖吶哋島油", None, "Saitama_tauiu", "https://x.com/Saitama_tauiu"),
    CreditEntry::new("陳式綠茶", None, "greenteachen081", "https://x.com/greenteachen081"),
];

/// One roster group with its heading and accent colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditGroup {
    pub title: &'static str,
    pub accent: &'static str,
    pub members: &'static [CreditEntry],
}

pub static CREDIT_GROUPS: [CreditGroup; 3] = [
    CreditGroup {
        title: "主辦單位",
        accent: "#1890ff",
        members: &ORGANIZERS,
    },
    CreditGroup {
        title: "後勤團隊",
        accent: "#faad14",
        members: &STAFF,
    },
    CreditGroup {
        title: "贊助單位",
        accent: "#52c41a",
        members: &SPONSORS,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: &'static str,
    pub date: &'static str,
    pub url: &'static str,
}

impl TimelineEntry {
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date, DATE_FORMAT).ok()
    }
}

pub static VIDEOS: [TimelineEntry; 8] = [
    TimelineEntry {
        title: "Eisnebel ch. 冰霧",
        date: "2023.10.26",
        url: "https://www.youtube.com/channel/UCvglsaXuC9oHuDJZaZbs0AQ",
    },
    TimelineEntry {
        title: "5MA之歌",
        date: "2024.01.31",
        url: "https://www.youtube.com/shorts/b7goxzEg4_M?feature=share",
    },
    TimelineEntry {
        title: "Supernova",
        date: "2024.02.14",
        url: "https://youtu.be/CU8HGeCL9T4",
    },
    TimelineEntry {
        title: "讓我把ㄐㄐ擱淺",
        date: "2024.03.29",
        url: "https://www.youtube.com/watch?v=uYJ7xlj_Azg",
    },
    TimelineEntry {
        title: "D-emo",
        date: "2024.04.14",
        url: "https://www.youtube.com/watch?v=Zn4xrl4Q1E4",
    },
    TimelineEntry {
        title: "離不開有你的所有幻想",
        date: "2024.10.12",
        url: "https://youtu.be/kA_LFZaWV_8",
    },
    TimelineEntry {
        title: "Break Reality",
        date: "2024.12.15",
        url: "https://youtu.be/TumBDTeMWb0",
    },
    TimelineEntry {
        title: "TTT",
        date: "2025.03.03",
        url: "https://www.youtube.com/watch?v=2H2YRWurKy8",
    },
];

pub mod footer {
    pub const TITLE: &str = "未來冰淇淋販売所";
    pub const ACCOUNT_HANDLE: &str = "@Mirai_ICE_Dept";
    pub const ACCOUNT_URL: &str = "https://twitter.com/Mirai_ICE_Dept";
    pub const ACCOUNT_NOTICE: [&str; 2] = [
        "本帳號為冰淇淋創建之非官方推特",
        "僅作為企劃公告與紀錄/分享冰淇淋們的日常活動",
    ];
    pub const DISCLAIMER_TITLE: &str = "特別聲明";
    pub const DISCLAIMERS: [&str; 4] = [
        "1. 本帳號非春魚官方相關帳號",
        "2. 本帳號非冰霧授權經營",
        "3. 帳號由非官方粉絲群管理人員所經營",
        "4. 發表之貼文皆不代表春魚官方與旗下藝人之立場",
    ];
    pub const COMMUNITY_LABEL: &str = "冰霧非官方粉絲群:";
    pub const COMMUNITY_URL: &str = "https://discord.gg/DQ4DNZAKGC";
}
