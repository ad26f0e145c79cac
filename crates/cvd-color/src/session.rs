//! Viewer session: capture a region, simulate it, hand it to a display.
//!
//! The session owns two collaborators. A [`CaptureSource`] grabs a screen
//! region as a [`PixelBuffer`]; a [`DisplaySink`] shows the transformed frame.
//! Between them the session keeps the current selector and the last raw
//! capture, so switching the selector re-renders without grabbing the screen
//! again.
//!
//! # Example
//!
//! ```rust
//! use cvd_color::session::{DisplaySink, ViewerSession};
//! use cvd_color::Deficiency;
//! use cvd_core::{Layout, PixelBuffer, Rect};
//!
//! struct Last(Option<PixelBuffer>);
//!
//! impl DisplaySink for Last {
//!     fn present(&mut self, frame: &PixelBuffer, _: Deficiency) {
//!         self.0 = Some(frame.clone());
//!     }
//! }
//!
//! let source = |r: Rect| PixelBuffer::filled(r.width, r.height, Layout::Rgb, &[255, 0, 0]);
//! let mut session = ViewerSession::new(source, Last(None));
//!
//! session.refresh(Rect::from_size(4, 4)).unwrap();
//! session.set_deficiency(Deficiency::Protanopia);
//! assert_eq!(session.sink().0.as_ref().unwrap().pixel(0, 0), &[115, 115, 0]);
//! ```

use crate::{ColorResult, Deficiency, Simulator};
use cvd_core::{Error, PixelBuffer, Rect};
use tracing::{debug, info, trace};

/// Supplies raw screen pixels for a region.
///
/// Closures `FnMut(Rect) -> cvd_core::Result<PixelBuffer>` implement this.
pub trait CaptureSource {
    /// Captures `region`. Failures should use [`Error::Capture`].
    fn capture(&mut self, region: Rect) -> cvd_core::Result<PixelBuffer>;
}

impl<F> CaptureSource for F
where
    F: FnMut(Rect) -> cvd_core::Result<PixelBuffer>,
{
    fn capture(&mut self, region: Rect) -> cvd_core::Result<PixelBuffer> {
        self(region)
    }
}

/// Receives rendered frames.
pub trait DisplaySink {
    /// Shows `frame`, which was rendered with `deficiency`.
    fn present(&mut self, frame: &PixelBuffer, deficiency: Deficiency);
}

/// Capture, simulate and present loop with a cached raw frame.
#[derive(Debug)]
pub struct ViewerSession<S, D> {
    source: S,
    sink: D,
    deficiency: Deficiency,
    region: Option<Rect>,
    capture: Option<PixelBuffer>,
}

impl<S: CaptureSource, D: DisplaySink> ViewerSession<S, D> {
    /// Creates a session showing [`Deficiency::Original`] with nothing captured.
    pub fn new(source: S, sink: D) -> Self {
        Self {
            source,
            sink,
            deficiency: Deficiency::Original,
            region: None,
            capture: None,
        }
    }

    /// Current selector.
    pub fn deficiency(&self) -> Deficiency {
        self.deficiency
    }

    /// Region of the cached capture, if any.
    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    /// Last raw (unsimulated) capture.
    pub fn cached_capture(&self) -> Option<&PixelBuffer> {
        self.capture.as_ref()
    }

    /// The capture source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The display sink.
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Mutable access to the display sink.
    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Consumes the session, returning its collaborators.
    pub fn into_parts(self) -> (S, D) {
        (self.source, self.sink)
    }

    /// Shows `region`, capturing only if it differs from the cached one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for a zero-area region (the source is not
    /// called), or whatever the source reports.
    pub fn refresh(&mut self, region: Rect) -> ColorResult<()> {
        check_region(region)?;
        if self.capture.is_some() && self.region == Some(region) {
            trace!(?region, "reusing cached capture");
        } else {
            self.grab(region)?;
        }
        self.render();
        Ok(())
    }

    /// Captures `region` unconditionally, then simulates and presents it.
    ///
    /// # Errors
    ///
    /// Same as [`refresh`](Self::refresh).
    pub fn recapture(&mut self, region: Rect) -> ColorResult<()> {
        check_region(region)?;
        self.grab(region)?;
        self.render();
        Ok(())
    }

    /// Switches the selector and re-renders the cached capture.
    ///
    /// Returns `true` if a frame was presented, `false` when nothing has been
    /// captured yet.
    pub fn set_deficiency(&mut self, deficiency: Deficiency) -> bool {
        if deficiency != self.deficiency {
            info!(from = %self.deficiency, to = %deficiency, "selector changed");
        }
        self.deficiency = deficiency;
        self.render()
    }

    /// Parses `name` and delegates to [`set_deficiency`](Self::set_deficiency).
    ///
    /// # Errors
    ///
    /// [`ColorError::UnsupportedTransform`](crate::ColorError::UnsupportedTransform)
    /// for an unknown name; the current selector is kept.
    pub fn set_deficiency_named(&mut self, name: &str) -> ColorResult<bool> {
        let deficiency = name.parse()?;
        Ok(self.set_deficiency(deficiency))
    }

    fn grab(&mut self, region: Rect) -> ColorResult<()> {
        debug!(?region, "capturing");
        let raw = self.source.capture(region)?;
        self.region = Some(region);
        self.capture = Some(raw);
        Ok(())
    }

    fn render(&mut self) -> bool {
        let Some(raw) = &self.capture else {
            return false;
        };
        let frame = Simulator::new(self.deficiency).apply(raw);
        self.sink.present(&frame, self.deficiency);
        true
    }
}

fn check_region(region: Rect) -> cvd_core::Result<()> {
    if region.is_empty() {
        return Err(Error::invalid_dimensions(
            region.width,
            region.height,
            "capture region has zero area",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_core::Layout;

    #[derive(Default)]
    struct Frames(Vec<(PixelBuffer, Deficiency)>);

    impl DisplaySink for Frames {
        fn present(&mut self, frame: &PixelBuffer, deficiency: Deficiency) {
            self.0.push((frame.clone(), deficiency));
        }
    }

    struct Counting {
        calls: usize,
        color: [u8; 3],
    }

    impl CaptureSource for Counting {
        fn capture(&mut self, region: Rect) -> cvd_core::Result<PixelBuffer> {
            self.calls += 1;
            PixelBuffer::filled(region.width, region.height, Layout::Rgb, &self.color)
        }
    }

    fn session() -> ViewerSession<Counting, Frames> {
        let source = Counting { calls: 0, color: [255, 0, 0] };
        ViewerSession::new(source, Frames::default())
    }

    #[test]
    fn test_refresh_reuses_cache_for_same_region() {
        let mut s = session();
        let region = Rect::new(10, 10, 4, 3);
        s.refresh(region).unwrap();
        s.refresh(region).unwrap();
        assert_eq!(s.source().calls, 1);
        assert_eq!(s.sink().0.len(), 2);

        s.refresh(Rect::new(11, 10, 4, 3)).unwrap();
        assert_eq!(s.source().calls, 2);
        assert_eq!(s.region(), Some(Rect::new(11, 10, 4, 3)));
    }

    #[test]
    fn test_recapture_always_captures() {
        let mut s = session();
        let region = Rect::from_size(2, 2);
        s.recapture(region).unwrap();
        s.recapture(region).unwrap();
        assert_eq!(s.source().calls, 2);
    }

    #[test]
    fn test_set_deficiency_rerenders_without_capture() {
        let mut s = session();
        assert!(!s.set_deficiency(Deficiency::Tritanopia));
        assert!(s.sink().0.is_empty());

        s.refresh(Rect::from_size(3, 3)).unwrap();
        assert!(s.set_deficiency(Deficiency::Protanopia));
        assert_eq!(s.source().calls, 1);

        let (frame, d) = s.sink().0.last().unwrap();
        assert_eq!(*d, Deficiency::Protanopia);
        assert_eq!(frame.pixel(2, 2), &[115, 115, 0]);
        // The cache stays raw.
        assert_eq!(s.cached_capture().unwrap().pixel(2, 2), &[255, 0, 0]);
    }

    #[test]
    fn test_named_selector_errors_keep_state() {
        let mut s = session();
        s.refresh(Rect::from_size(1, 1)).unwrap();
        s.set_deficiency_named("deuteranopia").unwrap();
        let err = s.set_deficiency_named("xyz").unwrap_err();
        assert!(err.is_unsupported_transform());
        assert_eq!(s.deficiency(), Deficiency::Deuteranopia);
        assert_eq!(s.sink().0.len(), 2);
    }

    #[test]
    fn test_zero_area_region_rejected_before_capture() {
        let mut s = session();
        let err = s.refresh(Rect::new(5, 5, 0, 10)).unwrap_err();
        assert!(matches!(
            err,
            crate::ColorError::Image(Error::InvalidDimensions { .. })
        ));
        assert!(s.recapture(Rect::from_size(3, 0)).is_err());
        assert_eq!(s.source().calls, 0);
        assert!(s.cached_capture().is_none());
    }

    #[test]
    fn test_capture_failure_keeps_previous_frame() {
        let mut fail = false;
        let source = move |r: Rect| {
            if fail {
                return Err(Error::capture("display went away"));
            }
            fail = true;
            PixelBuffer::filled(r.width, r.height, Layout::Rgb, &[9, 9, 9])
        };
        let mut s = ViewerSession::new(source, Frames::default());
        s.refresh(Rect::from_size(2, 2)).unwrap();
        let err = s.recapture(Rect::from_size(2, 2)).unwrap_err();
        assert_eq!(err.to_string(), "capture failed: display went away");
        assert_eq!(s.region(), Some(Rect::from_size(2, 2)));
        assert!(s.cached_capture().is_some());
    }
}
