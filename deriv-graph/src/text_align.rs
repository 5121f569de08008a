use cairo::{Context, Error, TextExtents};

/// Text drawing anchored at an arbitrary point of the text's bounding box.
pub trait ShowTextAlign {
    /// Draws `text` so that the point `align` of its bounding box lands on `point`.
    ///
    /// `align` is given in fractions of the text's width and height: `(0.0, 0.0)` anchors the
    /// bottom left corner (cairo's default), `(0.5, 0.5)` the center, and `(1.0, 1.0)` the top
    /// right corner.
    ///
    /// Returns the extents of the drawn text.
    fn show_text_align(
        &self,
        text: &str,
        point: (f64, f64),
        align: (f64, f64),
    ) -> Result<TextExtents, Error>;
}

impl ShowTextAlign for Context {
    fn show_text_align(
        &self,
        text: &str,
        (x, y): (f64, f64),
        (align_x, align_y): (f64, f64),
    ) -> Result<TextExtents, Error> {
        let extents = self.text_extents(text)?;
        self.move_to(
            x - extents.width() * align_x,
            y + extents.height() * align_y,
        );
        self.show_text(text)?;
        Ok(extents)
    }
}
