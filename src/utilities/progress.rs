//! Progress reporting for the long loops of the pipeline.

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar of length `len`, or a hidden one when `visible` is false.
pub fn progress_bar( len: usize, message: &'static str, visible: bool ) -> ProgressBar {
    if ! visible {
        return ProgressBar::hidden()
    }
    let bar = ProgressBar::new( len as u64 );
    if let Ok( style ) = ProgressStyle::with_template( "{msg:>16} [{bar:40}] {pos}/{len}" ) {
        bar.set_style( style.progress_chars( "=> " ) );
    }
    bar.set_message( message );
    bar
}
