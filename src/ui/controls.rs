/// Navigation bar
use iced::widget::{button, row, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Previous / Next / Generate File / Jump To, plus Open Folder.
/// Group buttons are disabled until something is loaded; Open Folder
/// is disabled while a scan is running.
pub fn navigation_bar<'a>(
    jump_input: &'a str,
    has_groups: bool,
    can_open: bool,
) -> Element<'a, Message> {
    let when_loaded = |message: Message| has_groups.then_some(message);

    row![
        button("Open Folder")
            .on_press_maybe(can_open.then_some(Message::OpenFolder))
            .padding(10),
        button("Previous").on_press_maybe(when_loaded(Message::Prev)).padding(10),
        button("Next").on_press_maybe(when_loaded(Message::Next)).padding(10),
        button("Generate File")
            .on_press_maybe(when_loaded(Message::GenerateFile))
            .padding(10),
        button("Jump To").on_press_maybe(when_loaded(Message::JumpTo)).padding(10),
        text_input("Enter bg number (e.g., 120)", jump_input)
            .on_input(Message::JumpInputChanged)
            .on_submit(Message::JumpTo)
            .width(Length::Fixed(200.0))
            .padding(8),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
