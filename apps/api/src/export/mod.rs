// Letter export: PDF rendering and the download endpoint.
// Clipboard copy happens in the browser and needs nothing server-side.

pub mod handlers;
pub mod pdf;
