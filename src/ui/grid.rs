/// Card grid for the displayed group
use iced::widget::{checkbox, column, container, image, text};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;
use std::path::Path;

use crate::state::data::ImageRecord;
use crate::state::session::ReviewSession;
use crate::Message;

/// Size of one image inside a card
#[derive(Debug, Clone, Copy)]
pub struct CardSize {
    pub width: f32,
    pub height: f32,
}

/// All cards of the current group, wrapped into rows
pub fn group_grid<'a>(
    session: &'a ReviewSession,
    fallback: &Path,
    size: CardSize,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = session
        .current_records()
        .iter()
        .map(|record| card(session, record, fallback, size))
        .collect();

    Wrap::with_elements(cards)
        .spacing(Pixels(16.0))
        .line_spacing(Pixels(16.0))
        .into()
}

fn card<'a>(
    session: &ReviewSession,
    record: &'a ImageRecord,
    fallback: &Path,
    size: CardSize,
) -> Element<'a, Message> {
    let location = record.location().map(|l| l.as_str()).unwrap_or_default();
    let condition = record.condition().unwrap_or_default();
    let handle = image::Handle::from_path(session.display_path(record, fallback));
    let path = record.image_path.clone();
    let substituted = session
        .is_broken(&record.image_path)
        .then(|| text("Image unavailable, showing placeholder").size(12));

    let content = column![
        text(format!("Location: {} Condition: {}", location, condition)).size(14),
        image(handle)
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height)),
    ]
    .push_maybe(substituted)
    .push(text(format!("Bg Name: {}", record.caption())).size(14))
    .push(
        checkbox("Needs Changes", session.is_flagged(&record.image_path))
            .on_toggle(move |_| Message::ToggleFlag(path.clone())),
    )
    .spacing(8);

    container(content)
        .padding(10)
        .style(container::rounded_box)
        .into()
}
