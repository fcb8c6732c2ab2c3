//! Gallery widgets: header controls, image tiles and the upload tile
use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{
    button, checkbox, column, container, horizontal_space, image, mouse_area, row, stack, text,
};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::config::GalleryConfig;
use crate::state::selection::{self, SelectAllState};
use crate::state::{Collection, ImageId, ImageRecord};
use crate::ui::drag::DragState;
use crate::Message;

/// Counter text shown next to the select-all checkbox
pub fn selection_label(collection: &Collection) -> String {
    let count = collection.selected_count();
    match selection::select_all_state(collection.records()) {
        _ if count == 1 => "1 File Selected".to_string(),
        SelectAllState::All if !collection.is_empty() => format!("All {} Files Selected", count),
        _ => format!("{} Files Selected", count),
    }
}

/// Select-all checkbox, selection counter and delete button
pub fn header(collection: &Collection) -> Element<'_, Message> {
    let count = collection.selected_count();

    row![
        checkbox("", collection.is_all_selected()).on_toggle(Message::SetAllSelected),
        text(selection_label(collection)).size(18),
        horizontal_space(),
        button("Delete")
            .style(button::danger)
            .padding([8, 16])
            .on_press_maybe((count > 0).then_some(Message::DeleteSelected)),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

/// All image tiles in collection order, followed by the upload tile
pub fn grid<'a>(
    collection: &'a Collection,
    thumbnails: &'a HashMap<ImageId, Handle>,
    drag: &DragState,
    layout: &GalleryConfig,
) -> Element<'a, Message> {
    let size = layout.thumbnail_size as f32;

    let mut tiles: Vec<Element<'a, Message>> = collection
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            // The first image spans two rows and two columns
            let tile_size = if index == 0 && layout.feature_first {
                size * 2.0 + layout.tile_spacing
            } else {
                size
            };
            tile(
                record,
                index,
                thumbnails.get(&record.id),
                tile_size,
                drag.is_drop_target(index),
            )
        })
        .collect();

    tiles.push(upload_tile(size));

    Wrap::with_elements(tiles)
        .spacing(layout.tile_spacing)
        .line_spacing(layout.tile_spacing)
        .into()
}

/// A single image with its checkbox overlay
fn tile<'a>(
    record: &'a ImageRecord,
    index: usize,
    thumbnail: Option<&Handle>,
    size: f32,
    is_drop_target: bool,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        // Still loading (or failed): show the label instead
        None => container(text(record.label()).size(14))
            .padding(8)
            .center(Length::Fill)
            .into(),
    };

    let id = record.id;
    let overlay = container(
        checkbox("", record.is_selected()).on_toggle(move |_| Message::ToggleSelected(id)),
    )
    .padding(8);

    let style: fn(&Theme) -> container::Style = if is_drop_target {
        container::bordered_box
    } else {
        container::rounded_box
    };

    let framed = container(stack![picture, overlay])
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .style(style);

    mouse_area(framed)
        .on_press(Message::DragStarted(index))
        .on_enter(Message::DragEntered(index))
        .on_exit(Message::DragLeft(index))
        .into()
}

/// "+ Upload" tile that opens the file picker
fn upload_tile<'a>(size: f32) -> Element<'a, Message> {
    let content = column![text("+").size(32), text("Upload").size(16)]
        .spacing(8)
        .align_x(Alignment::Center);

    button(container(content).center(Length::Fill))
        .style(button::secondary)
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .on_press(Message::UploadRequested)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ImageSource;

    fn collection(selected: &[bool]) -> Collection {
        let mut collection = Collection::new();
        let records = selected
            .iter()
            .enumerate()
            .map(|(i, &flag)| {
                let id = i as u64 + 1;
                ImageRecord::new(
                    ImageId(id),
                    ImageSource::Remote(format!("https://example.com/{id}.webp")),
                    format!("{id}.webp"),
                )
                .with_selected(flag)
            })
            .collect();
        collection.load(records).unwrap();
        collection
    }

    #[test]
    fn test_label_when_everything_selected() {
        assert_eq!(selection_label(&collection(&[true, true, true])), "All 3 Files Selected");
    }

    #[test]
    fn test_label_for_single_selection() {
        assert_eq!(selection_label(&collection(&[false, true, false])), "1 File Selected");
        assert_eq!(selection_label(&collection(&[true])), "1 File Selected");
    }

    #[test]
    fn test_label_for_partial_and_no_selection() {
        assert_eq!(selection_label(&collection(&[true, true, false])), "2 Files Selected");
        assert_eq!(selection_label(&collection(&[false, false])), "0 Files Selected");
    }

    #[test]
    fn test_label_for_empty_gallery() {
        assert_eq!(selection_label(&Collection::new()), "0 Files Selected");
    }
}
