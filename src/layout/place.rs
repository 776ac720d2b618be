use super::core::WidgetRecord;

/// Stack rows top to bottom and pack widgets left to right within a row.
/// A row is as tall as its tallest widget.
pub fn place_widgets(widgets: &mut [WidgetRecord]) {
    let mut current_row = 0;
    let mut x = 0.0;
    let mut y = 0.0;
    for idx in 0..widgets.len() {
        if widgets[idx].row_no != current_row {
            let row_height = widgets[..idx]
                .iter()
                .rev()
                .take_while(|w| w.row_no == current_row)
                .fold(0.0, |acc, w| f64::max(acc, w.height));
            y += row_height;
            x = 0.0;
            current_row = widgets[idx].row_no;
        }

        let widget = &mut widgets[idx];
        widget.x = x;
        widget.y = y;
        x += widget.width;
    }
}
