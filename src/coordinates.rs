//! Mapping pointer clicks on a letterboxed image back to native pixels.

use crate::models::{ClickEvent, ImageElement, SelectData};

/// Map a click on a uniformly scaled, centred image element to the native pixel under it.
///
/// The element is assumed to scale the image to fit its box while preserving aspect ratio,
/// padding the leftover axis evenly on both sides. Returns `None` when the click lands in that
/// padding, outside the half-open range `[0, width) × [0, height)`, or when the element has no
/// usable size.
pub fn get_coordinates_of_clicked_image(
  event: &ClickEvent,
  image: &ImageElement,
) -> Option<(u32, u32)> {
  let natural_width = f64::from(image.natural_width);
  let natural_height = f64::from(image.natural_height);
  let bounds = image.bounds;

  let x_scale = natural_width / bounds.width;
  let y_scale = natural_height / bounds.height;

  let (x, y) = if x_scale > y_scale {
    let displayed_height = natural_height / x_scale;
    let y_offset = (bounds.height - displayed_height) / 2.0;
    (
      round_half_up((event.client_x - bounds.left) * x_scale),
      round_half_up((event.client_y - bounds.top - y_offset) * x_scale),
    )
  } else {
    let displayed_width = natural_width / y_scale;
    let x_offset = (bounds.width - displayed_width) / 2.0;
    (
      round_half_up((event.client_x - bounds.left - x_offset) * y_scale),
      round_half_up((event.client_y - bounds.top) * y_scale),
    )
  };

  if !(0.0..natural_width).contains(&x) || !(0.0..natural_height).contains(&y) {
    return None;
  }

  Some((x as u32, y as u32))
}

/// Build the `select` payload for a click, or `None` when it missed the image.
pub fn select_data_for_click(event: &ClickEvent, image: &ImageElement) -> Option<SelectData> {
  get_coordinates_of_clicked_image(event, image).map(|(x, y)| SelectData::pixel(x, y))
}

// Browser rounding: halves go towards positive infinity.
fn round_half_up(value: f64) -> f64 {
  (value + 0.5).floor()
}
