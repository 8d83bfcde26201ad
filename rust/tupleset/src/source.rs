//! One-shot row producers consumed by streaming ingestion.
//!
//! A [`RowSource`] is the narrow interface through which an external query
//! engine hands over its result iteration. Sequences drain a source exactly
//! once and always close it, on success, on error and during unwinding.

use crate::Row;

/// A one-shot, closeable, fallible producer of rows.
pub trait RowSource {
    type Error;

    /// Returns the next row, an error, or `None` once the source is exhausted.
    fn next_row(&mut self) -> Option<Result<Row, Self::Error>>;

    /// Releases the resources held by the source.
    ///
    /// Called exactly once by the draining sequence, whatever the outcome of
    /// the drain.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    type Error = S::Error;

    fn next_row(&mut self) -> Option<Result<Row, Self::Error>> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    type Error = S::Error;

    fn next_row(&mut self) -> Option<Result<Row, Self::Error>> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Adapts an iterator of fallible rows into a [`RowSource`] with a no-op close.
#[derive(Debug, Clone)]
pub struct IterSource<I>(I);

impl<I, E> RowSource for IterSource<I>
where
    I: Iterator<Item = Result<Row, E>>,
{
    type Error = E;

    fn next_row(&mut self) -> Option<Result<Row, E>> {
        self.0.next()
    }
}

/// Wraps `iter` into an [`IterSource`].
pub fn iter_source<I, E>(iter: I) -> IterSource<I::IntoIter>
where
    I: IntoIterator<Item = Result<Row, E>>,
{
    IterSource(iter.into_iter())
}

/// Closes the wrapped source when dropped, unless [`CloseGuard::close`] was
/// already called.
struct CloseGuard<'a, S: RowSource> {
    source: &'a mut S,
    open: bool,
}

impl<'a, S: RowSource> CloseGuard<'a, S> {
    fn new(source: &'a mut S) -> Self {
        CloseGuard { source, open: true }
    }

    fn close(mut self) -> Result<(), S::Error> {
        self.open = false;
        self.source.close()
    }
}

impl<S: RowSource> Drop for CloseGuard<'_, S> {
    fn drop(&mut self) {
        if self.open && self.source.close().is_err() {
            log::warn!("failed to close row source while unwinding");
        }
    }
}

/// Appends every row of `source` to `sink` and closes the source.
///
/// Stops at the first error produced by the source. Rows received before the
/// error stay in `sink`. A drain error takes precedence over a close error.
///
/// Returns the number of rows appended.
pub(crate) fn drain_into<S: RowSource>(mut source: S, sink: &mut Vec<Row>) -> Result<usize, S::Error> {
    let mut guard = CloseGuard::new(&mut source);
    let start = sink.len();
    let drained = loop {
        match guard.source.next_row() {
            Some(Ok(row)) => sink.push(row),
            Some(Err(e)) => break Err(e),
            None => break Ok(()),
        }
    };
    let appended = sink.len() - start;
    let closed = guard.close();
    match (drained, closed) {
        (Ok(()), Ok(())) => {
            log::trace!("drained {appended} rows from source");
            Ok(appended)
        }
        (Ok(()), Err(e)) => Err(e),
        (Err(e), closed) => {
            if closed.is_err() {
                log::warn!("row source failed after {appended} rows and could not be closed");
            } else {
                log::debug!("row source failed after {appended} rows");
            }
            Err(e)
        }
    }
}
