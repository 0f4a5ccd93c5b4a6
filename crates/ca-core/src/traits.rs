/// Surface de cellules sur laquelle le moteur de tramage écrit.
///
/// The engine only sets the pen colour pair and puts glyphs; everything
/// else (storage, export, display) belongs to the implementor.
/// Implémenté par : `CellGrid`.
///
/// # Example
/// ```
/// use ca_core::traits::Canvas;
///
/// struct Counter { puts: usize }
/// impl Canvas for Counter {
///     fn width(&self) -> u32 { 80 }
///     fn height(&self) -> u32 { 24 }
///     fn set_color_ansi(&mut self, _fg: u8, _bg: u8) {}
///     fn put_char(&mut self, _x: i32, _y: i32, _ch: char) { self.puts += 1; }
/// }
/// ```
pub trait Canvas {
    /// Width in cells.
    fn width(&self) -> u32;

    /// Height in cells.
    fn height(&self) -> u32;

    /// Select the palette colour pair used by subsequent [`Canvas::put_char`]
    /// calls. Indices 0–15 are the ANSI colours.
    fn set_color_ansi(&mut self, fg: u8, bg: u8);

    /// Write `ch` with the current colour pair at (x, y).
    ///
    /// CONTRAT : hors limites → aucun effet.
    fn put_char(&mut self, x: i32, y: i32, ch: char);
}
