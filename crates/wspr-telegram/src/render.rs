//! Rendering of core reply payloads into teloxide types.

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult, InlineQueryResultArticle,
    InputMessageContent, InputMessageContentText, ParseMode,
};

use wspr_core::replies::{Button, InlineCard};

/// Render one card into an inline query result article. `idx` becomes the
/// result id; ids only need to be unique within a single answer.
pub fn to_inline_result(idx: usize, card: &InlineCard) -> InlineQueryResult {
    let content = InputMessageContent::Text(
        InputMessageContentText::new(card.message_html.clone()).parse_mode(ParseMode::Html),
    );

    let mut article = InlineQueryResultArticle::new(idx.to_string(), card.title.clone(), content)
        .description(card.description.clone());

    if let Some(markup) = keyboard(&card.buttons) {
        article = article.reply_markup(markup);
    }

    InlineQueryResult::Article(article)
}

fn keyboard(rows: &[Vec<Button>]) -> Option<InlineKeyboardMarkup> {
    if rows.is_empty() {
        return None;
    }
    let rows: Vec<Vec<InlineKeyboardButton>> = rows
        .iter()
        .map(|row| row.iter().filter_map(to_button).collect())
        .collect();
    Some(InlineKeyboardMarkup::new(rows))
}

fn to_button(button: &Button) -> Option<InlineKeyboardButton> {
    match button {
        Button::Callback { label, data } => {
            Some(InlineKeyboardButton::callback(label.clone(), data.clone()))
        }
        // A deep link that fails to parse drops the button rather than the
        // whole answer.
        Button::Url { label, url } => url
            .parse()
            .ok()
            .map(|u| InlineKeyboardButton::url(label.clone(), u)),
        Button::SwitchInline { label, query } => Some(
            InlineKeyboardButton::switch_inline_query_current_chat(label.clone(), query.clone()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn card_with(buttons: Vec<Vec<Button>>) -> InlineCard {
        InlineCard {
            title: "t".to_string(),
            description: "d".to_string(),
            message_html: "<b>m</b>".to_string(),
            buttons,
        }
    }

    #[test]
    fn renders_article_with_description() {
        let result = to_inline_result(0, &card_with(Vec::new()));
        let InlineQueryResult::Article(article) = result else {
            panic!("expected an article");
        };
        assert_eq!(article.id, "0");
        assert_eq!(article.title, "t");
        assert_eq!(article.description.as_deref(), Some("d"));
        assert!(article.reply_markup.is_none());
    }

    #[test]
    fn maps_all_button_kinds() {
        let result = to_inline_result(
            1,
            &card_with(vec![vec![
                Button::Callback {
                    label: "cb".to_string(),
                    data: "show_1".to_string(),
                },
                Button::Url {
                    label: "link".to_string(),
                    url: "https://t.me/alice".to_string(),
                },
                Button::SwitchInline {
                    label: "again".to_string(),
                    query: "wspr alice ".to_string(),
                },
            ]]),
        );
        let InlineQueryResult::Article(article) = result else {
            panic!("expected an article");
        };
        let markup = article.reply_markup.expect("keyboard");
        let row = &markup.inline_keyboard[0];
        assert_eq!(row.len(), 3);
        assert!(matches!(
            &row[0].kind,
            InlineKeyboardButtonKind::CallbackData(d) if d == "show_1"
        ));
        assert!(matches!(&row[1].kind, InlineKeyboardButtonKind::Url(_)));
        assert!(matches!(
            &row[2].kind,
            InlineKeyboardButtonKind::SwitchInlineQueryCurrentChat(q) if q == "wspr alice "
        ));
    }

    #[test]
    fn unparseable_url_drops_only_that_button() {
        let result = to_inline_result(
            2,
            &card_with(vec![vec![
                Button::Url {
                    label: "bad".to_string(),
                    url: "not a url".to_string(),
                },
                Button::Callback {
                    label: "cb".to_string(),
                    data: "del_1".to_string(),
                },
            ]]),
        );
        let InlineQueryResult::Article(article) = result else {
            panic!("expected an article");
        };
        let markup = article.reply_markup.expect("keyboard");
        assert_eq!(markup.inline_keyboard[0].len(), 1);
    }
}
