// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual snacks.
//!
//! Toasts are small cards with a severity-coloured accent border, a glyph,
//! the message and a dismiss button. The overlay groups them by anchor and
//! layers the six groups on top of each other.

use super::transition::{Entry, Frame, Transitions};
use super::Message;
use crate::snack::{Position, Severity, Snack, SnackStore, Scheduler};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{
    button, container, float, text, tooltip, Column, Container, Row, Stack, Text,
};
use iced::{alignment, Color, Element, Length, Theme, Vector};
use std::time::Instant;

/// Tooltip of the dismiss button.
pub const CLOSE_LABEL: &str = "Close notification";

pub struct Toast;

impl Toast {
    /// Renders a single toast. Ghosts (`interactive == false`) get a dismiss
    /// button without a press handler.
    pub fn view(snack: &Snack, frame: Frame, interactive: bool) -> Element<'_, Message> {
        let severity = snack.severity();
        let accent_color = accent_color(severity);
        let alpha = frame.opacity;

        let glyph = Text::new(severity_glyph(severity))
            .size(sizing::ICON_MD)
            .style(move |_theme: &Theme| text::Style {
                color: Some(fade(accent_color, alpha)),
            });

        let message_widget = Text::new(snack.message())
            .size(typography::BODY)
            .style(move |theme: &Theme| text::Style {
                color: Some(fade(theme.palette().text, alpha)),
            });

        let mut dismiss_button = button(Text::new("×").size(sizing::ICON_SM))
            .padding(spacing::XXS)
            .style(dismiss_button_style);
        if interactive {
            dismiss_button = dismiss_button.on_press(Message::Close(snack.id()));
        }
        let dismiss = tooltip(
            dismiss_button,
            Text::new(CLOSE_LABEL).size(typography::CAPTION),
            tooltip::Position::Bottom,
        );

        // Layout: [glyph] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph).padding(spacing::XXS))
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss);

        let card = Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color, alpha));

        // The card keeps its layout slot and is drawn shifted to the right.
        let offset = frame.offset;
        float(card)
            .translate(move |_bounds, _viewport| slide_translation(offset))
            .into()
    }

    /// Renders every queued snack plus fading ghosts, grouped by anchor.
    pub fn view_overlay<'a, S: Scheduler>(
        store: &'a SnackStore<S>,
        transitions: &'a Transitions,
        now: Instant,
    ) -> Element<'a, Message> {
        let mut layers: Vec<Element<'a, Message>> = Vec::new();

        for anchor in Position::ALL {
            let toasts: Vec<Element<'a, Message>> = transitions
                .column(store.snacks(), anchor)
                .into_iter()
                .map(|entry| match entry {
                    Entry::Live(snack) => {
                        Self::view(snack, transitions.frame(snack.id(), now), true)
                    }
                    Entry::Leaving(ghost) => Self::view(ghost.snack(), ghost.frame(now), false),
                })
                .collect();
            if toasts.is_empty() {
                continue;
            }

            let (horizontal, vertical) = anchor_alignment(anchor);
            let column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(horizontal);

            layers.push(
                Container::new(column)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(horizontal)
                    .align_y(vertical)
                    .padding(spacing::MD)
                    .into(),
            );
        }

        if layers.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            Stack::with_children(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

/// Accent colour for a severity.
#[must_use]
pub fn accent_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => palette::SUCCESS_500,
        Severity::Error => palette::ERROR_500,
        Severity::Warning => palette::WARNING_500,
        Severity::Info => palette::INFO_500,
    }
}

fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✕",
        Severity::Warning => "!",
        Severity::Info => "i",
    }
}

fn anchor_alignment(anchor: Position) -> (alignment::Horizontal, alignment::Vertical) {
    let horizontal = match anchor {
        Position::TopLeft | Position::BottomLeft => alignment::Horizontal::Left,
        Position::TopCenter | Position::BottomCenter => alignment::Horizontal::Center,
        Position::TopRight | Position::BottomRight => alignment::Horizontal::Right,
    };
    let vertical = if anchor.is_top() {
        alignment::Vertical::Top
    } else {
        alignment::Vertical::Bottom
    };
    (horizontal, vertical)
}

fn slide_translation(offset: f32) -> Vector {
    Vector::new(offset, 0.0)
}

fn fade(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(fade(bg_color, alpha))),
        border: iced::Border {
            color: fade(accent_color, alpha),
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: fade(shadow::MD.color, alpha * opacity::OVERLAY_MEDIUM),
            ..shadow::MD
        },
        text_color: Some(fade(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    let hover = |overlay: f32| button::Style {
        background: Some(iced::Background::Color(Color {
            a: overlay,
            ..palette::GRAY_400
        })),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => hover(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover(opacity::OVERLAY_MEDIUM),
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
