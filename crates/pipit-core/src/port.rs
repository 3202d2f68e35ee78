//! Ports: dual-view conduits between pipeline stages
//!
//! Every port exposes the same logical conduit two ways:
//!
//! - a **channel** view ([`Chan`]) carrying structured [`Value`]s over a
//!   bounded crossbeam channel, so a slow reader stalls a fast writer;
//! - a **stream** view ([`Stream`]) carrying raw bytes.
//!
//! Code that only reads or only writes values should depend on
//! [`ValueSource`] or [`ValueSink`] rather than on `Port`.
//!
//! Handles are reference counted. Closing a port drops this holder's
//! handles; the reader sees end-of-stream once every writer handle is gone.

use crate::error::PortError;
use crate::value::Value;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::Arc;

pub mod pipe;

/// Read side of a value conduit.
pub trait ValueSource {
    /// Block until a value arrives. `None` means end-of-stream.
    fn take(&self) -> Option<Value>;

    /// Iterate until end-of-stream.
    fn values(&self) -> Values<'_, Self>
    where
        Self: Sized,
    {
        Values { source: self }
    }
}

/// Write side of a value conduit.
pub trait ValueSink {
    /// Block until the reader accepts `value`.
    fn put(&self, value: Value) -> Result<(), PortError>;
}

pub struct Values<'a, S> {
    source: &'a S,
}

impl<S: ValueSource> Iterator for Values<'_, S> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.source.take()
    }
}

/// Channel view of a port.
#[derive(Clone, Default)]
pub struct Chan {
    tx: Option<Sender<Value>>,
    rx: Option<Receiver<Value>>,
}

impl Chan {
    /// A chan with neither side: reads end immediately, writes fail.
    pub fn closed() -> Self {
        Chan::default()
    }

    /// Connected (writer, reader) chans over a bounded channel.
    pub fn bounded(capacity: usize) -> (Chan, Chan) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Chan::from_sender(tx), Chan::from_receiver(rx))
    }

    /// Connected (writer, reader) chans that never block the writer.
    pub fn unbounded() -> (Chan, Chan) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Chan::from_sender(tx), Chan::from_receiver(rx))
    }

    pub fn from_sender(tx: Sender<Value>) -> Self {
        Chan { tx: Some(tx), rx: None }
    }

    pub fn from_receiver(rx: Receiver<Value>) -> Self {
        Chan { tx: None, rx: Some(rx) }
    }

    /// A reader chan that yields `values` and then ends.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        for value in values {
            // The receiver is alive in this scope, so sending cannot fail.
            let _ = tx.send(value);
        }
        Chan::from_receiver(rx)
    }

    pub fn can_read(&self) -> bool {
        self.rx.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.tx.is_some()
    }

    pub fn close(&mut self) {
        self.tx = None;
        self.rx = None;
    }
}

impl ValueSource for Chan {
    fn take(&self) -> Option<Value> {
        let value = self.rx.as_ref()?.recv().ok();
        if value.is_some() {
            tracing::trace!("chan: received value");
        }
        value
    }
}

impl ValueSink for Chan {
    fn put(&self, value: Value) -> Result<(), PortError> {
        let tx = self.tx.as_ref().ok_or(PortError::Closed)?;
        tracing::trace!(kind = %value.type_tag(), "chan: sending value");
        tx.send(value).map_err(|_| PortError::Disconnected)
    }
}

type SharedReader = Arc<Mutex<BufReader<Box<dyn Read + Send>>>>;
type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Byte-stream view of a port.
#[derive(Clone, Default)]
pub struct Stream {
    reader: Option<SharedReader>,
    writer: Option<SharedWriter>,
}

impl Stream {
    pub fn closed() -> Self {
        Stream::default()
    }

    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        let boxed: Box<dyn Read + Send> = Box::new(reader);
        Stream {
            reader: Some(Arc::new(Mutex::new(BufReader::new(boxed)))),
            writer: None,
        }
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        let boxed: Box<dyn Write + Send> = Box::new(writer);
        Stream {
            reader: None,
            writer: Some(Arc::new(Mutex::new(boxed))),
        }
    }

    pub fn can_read(&self) -> bool {
        self.reader.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.writer.is_some()
    }

    pub fn write_all(&self, bytes: &[u8]) -> Result<(), PortError> {
        let writer = self.writer.as_ref().ok_or(PortError::Closed)?;
        let mut writer = writer.lock();
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_str(&self, text: &str) -> Result<(), PortError> {
        self.write_all(text.as_bytes())
    }

    /// Read through the next `\n` (kept in `buf`). Returns 0 at end of input;
    /// a stream without a reader is always at end of input.
    pub fn read_line(&self, buf: &mut String) -> Result<usize, PortError> {
        match &self.reader {
            Some(reader) => Ok(reader.lock().read_line(buf)?),
            None => Ok(0),
        }
    }

    /// Read raw bytes through the next `\n` (kept in `buf`), whatever their
    /// encoding. Returns 0 at end of input.
    pub fn read_line_bytes(&self, buf: &mut Vec<u8>) -> Result<usize, PortError> {
        match &self.reader {
            Some(reader) => Ok(reader.lock().read_until(b'\n', buf)?),
            None => Ok(0),
        }
    }

    /// An owned `Read` handle sharing this stream's buffer.
    pub fn reader(&self) -> StreamReader {
        StreamReader {
            inner: self.reader.clone(),
        }
    }

    pub fn close(&mut self) {
        self.reader = None;
        self.writer = None;
    }
}

pub struct StreamReader {
    inner: Option<SharedReader>,
}

impl Read for StreamReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.inner {
            Some(reader) => reader.lock().read(buf),
            None => Ok(0),
        }
    }
}

/// A conduit with both views.
#[derive(Clone, Default)]
pub struct Port {
    pub chan: Chan,
    pub stream: Stream,
}

impl Port {
    pub fn new(chan: Chan, stream: Stream) -> Self {
        Port { chan, stream }
    }

    pub fn closed() -> Self {
        Port::default()
    }

    pub fn close(&mut self) {
        self.chan.close();
        self.stream.close();
    }
}

impl ValueSource for Port {
    fn take(&self) -> Option<Value> {
        self.chan.take()
    }
}

impl ValueSink for Port {
    fn put(&self, value: Value) -> Result<(), PortError> {
        self.chan.put(value)
    }
}

/// Create a connected (writer end, reader end) pair of ports: one bounded
/// value channel and one bounded byte pipe.
pub fn pipe(chan_capacity: usize, pipe_capacity: usize) -> (Port, Port) {
    let (chan_tx, chan_rx) = Chan::bounded(chan_capacity);
    let (byte_tx, byte_rx) = pipe::byte_pipe(pipe_capacity);
    (
        Port::new(chan_tx, Stream::from_writer(byte_tx)),
        Port::new(chan_rx, Stream::from_reader(byte_rx)),
    )
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod port_tests;
