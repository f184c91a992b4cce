// SPDX-License-Identifier: MPL-2.0
//! View rendering for the demo application.

use super::Message;
use crate::snack::Severity;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::toaster::Toaster;
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub toaster: &'a Toaster,
    pub sent: u32,
}

/// Renders the control panel with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let severity_buttons = Severity::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, severity| {
            row.push(
                button(Text::new(severity.as_str()))
                    .on_press(Message::Show(severity))
                    .padding(spacing::XS),
            )
        },
    );

    let queue_buttons = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new("sticky error"))
                .on_press(Message::ShowSticky)
                .padding(spacing::XS),
        )
        .push(
            button(Text::new("every anchor"))
                .on_press(Message::ShowEverywhere)
                .padding(spacing::XS),
        )
        .push(
            button(Text::new("remove oldest"))
                .on_press(Message::RemoveOldest)
                .padding(spacing::XS),
        )
        .push(
            button(Text::new("clear all"))
                .on_press(Message::ClearAll)
                .padding(spacing::XS),
        )
        .push(
            button(Text::new("toggle theme"))
                .on_press(Message::ToggleTheme)
                .padding(spacing::XS),
        );

    let queued = ctx.toaster.store().map(|store| store.len()).unwrap_or(0);
    let counters = Text::new(format!("queued: {queued} · dispatched: {}", ctx.sent))
        .size(typography::CAPTION);

    let panel = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("SnackMate").size(typography::TITLE_MD))
        .push(severity_buttons)
        .push(queue_buttons)
        .push(counters)
        .push(Text::new("Press Esc to dismiss the newest snack").size(typography::CAPTION));

    let content = Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG);

    Stack::new()
        .push(content)
        .push(ctx.toaster.view().map(Message::Toaster))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
