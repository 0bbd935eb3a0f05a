use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBy {
    Chars,
    Words,
}

impl SplitBy {
    pub fn class(self) -> &'static str {
        match self {
            SplitBy::Chars => "split-char",
            SplitBy::Words => "split-word",
        }
    }

    /// Selector matching the animated pieces under a rendered [`SplitText`].
    pub fn selector(self) -> &'static str {
        match self {
            SplitBy::Chars => ".split-char",
            SplitBy::Words => ".split-word",
        }
    }
}

/// One rendered span; whitespace is kept for layout but never animated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub animated: bool,
}

pub fn split(text: &str, by: SplitBy) -> Vec<Piece> {
    match by {
        SplitBy::Chars => text
            .chars()
            .map(|c| Piece {
                text: c.to_string(),
                animated: !c.is_whitespace(),
            })
            .collect(),
        SplitBy::Words => {
            let mut pieces = Vec::new();
            let mut current = String::new();
            for c in text.chars() {
                if c.is_whitespace() {
                    if !current.is_empty() {
                        pieces.push(Piece {
                            text: std::mem::take(&mut current),
                            animated: true,
                        });
                    }
                    pieces.push(Piece {
                        text: c.to_string(),
                        animated: false,
                    });
                } else {
                    current.push(c);
                }
            }
            if !current.is_empty() {
                pieces.push(Piece {
                    text: current,
                    animated: true,
                });
            }
            pieces
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SplitTextProps {
    pub text: AttrValue,
    pub by: SplitBy,
    #[prop_or_default]
    pub class: Classes,
}

/// Text broken into inline-block spans so every glyph or word can be
/// animated on its own.
#[function_component(SplitText)]
pub fn split_text(props: &SplitTextProps) -> Html {
    let class = props.by.class();
    html! {
        <span class={props.class.clone()} aria-label={props.text.clone()}>
            { for split(&props.text, props.by).into_iter().map(|piece| {
                if piece.animated {
                    html! { <span class={class} aria-hidden="true">{ piece.text }</span> }
                } else {
                    html! { <span aria-hidden="true">{ piece.text }</span> }
                }
            }) }
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animated(pieces: &[Piece]) -> Vec<&str> {
        pieces
            .iter()
            .filter(|piece| piece.animated)
            .map(|piece| piece.text.as_str())
            .collect()
    }

    #[test]
    fn chars_split_cjk_and_latin_alike() {
        let pieces = split("冰霧 Eis", SplitBy::Chars);
        assert_eq!(pieces.len(), 6);
        assert_eq!(animated(&pieces), vec!["冰", "霧", "E", "i", "s"]);
    }

    #[test]
    fn words_keep_separators_unanimated() {
        let pieces = split("2025 生日冰箱", SplitBy::Words);
        assert_eq!(animated(&pieces), vec!["2025", "生日冰箱"]);
        assert_eq!(pieces.len(), 3);
        assert!(!pieces[1].animated);
    }

    #[test]
    fn rejoining_pieces_gives_back_text() {
        let text = "  感謝以下人員  與單位 ";
        for by in [SplitBy::Chars, SplitBy::Words] {
            let joined: String = split(text, by).into_iter().map(|piece| piece.text).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn empty_text_has_no_pieces() {
        assert!(split("", SplitBy::Chars).is_empty());
        assert!(split("", SplitBy::Words).is_empty());
    }
}
