use std::collections::BTreeMap;

/// Category (hobby type) -> words in insertion order.
pub type WordBank = BTreeMap<String, Vec<String>>;

const DEFAULT_BANK: &[(&str, &[&str])] = &[
    ("game", &["마인크래프트", "리그오브레전드", "배틀그라운드", "오버워치"]),
    ("food", &["피자", "치킨", "떡볶이", "김치찌개"]),
    ("music", &["기타", "피아노", "드럼", "노래방"]),
    ("sport", &["축구", "농구", "야구", "수영"]),
    ("movie", &["액션", "코미디", "애니메이션", "공포"]),
];

/// Fresh copy of the built-in bank used for seeding and reset.
pub fn default_bank() -> WordBank {
    DEFAULT_BANK
        .iter()
        .map(|(category, words)| {
            (
                category.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}
