extern crate serde;

use crate::bins::Bin;
use crate::hist::{Histogram, HistogramError};
use crate::label::Bar;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::{Read, Write};

// See: https://rust-by-example-ext.com/serde/json.html
#[derive(Serialize, Deserialize, Debug)]
struct HistJson {
    #[serde(default)]
    bars: Vec<Bar>,
    bins: Vec<Bin>,
    min: f64,
    max: f64,
    bin_size: f64,
}

impl Histogram {
    /// Transform the histogram to a JSON string.
    ///
    /// Next to the `"bins"`, `"min"`, `"max"`, and `"bin_size"` fields describing the histogram,
    /// the JSON contains the `"bars"` array with the labels and counts (see [`Histogram::bars`])
    /// ready to be drawn by a bar chart.
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::Histogram;
    ///
    /// let hist = Histogram::new(&[1.0, 2.0, 3.0], 1).unwrap();
    /// assert_eq!(
    ///     hist.to_json().unwrap(),
    ///     concat!(
    ///         r#"{"bars":[{"label":"1.00—3.00","count":3}],"#,
    ///         r#""bins":[{"start":1.0,"end":3.0,"count":3}],"#,
    ///         r#""min":1.0,"max":3.0,"bin_size":2.0}"#,
    ///     )
    /// );
    /// ```
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&HistJson::from(self))
    }

    /// Read histogram from JSON using a reader.
    ///
    /// See [`Histogram::to_json`] for the format, the `"bars"` are not needed for reading.
    ///
    /// # Errors
    ///
    /// Besides malformed JSON, it fails when the bins are not laid out the way [`Histogram::new`]
    /// would lay them out: there are none, they leave gaps, or they don't span from `min` to `max`.
    pub fn read_json<R>(reader: R) -> Result<Self, Box<dyn Error>>
    where
        R: Read,
    {
        let json: HistJson = serde_json::from_reader(reader).map_err(Box::new)?;
        let hist = Histogram::try_from(json)?;
        Ok(hist)
    }

    /// Write histogram to JSON using a writer.
    ///
    /// See [`Histogram::to_json`] for more details.
    pub fn write_json<W>(&self, writer: &mut W) -> Result<(), Box<dyn Error>>
    where
        W: Write,
    {
        serde_json::to_writer(writer, &HistJson::from(self)).map_err(Box::new)?;
        Ok(())
    }

    /// Read histogram from a [MessagePack] format using a reader.
    ///
    /// The bins are checked the same way as in [`Histogram::read_json`].
    ///
    /// [MessagePack]: https://msgpack.org/
    ///
    /// # Examples
    ///
    /// ```
    /// use normhist::{Histogram, Session};
    ///
    /// let session = Session::generate(1000, Some(3));
    /// let hist = session.histogram(20).unwrap();
    ///
    /// let mut buffer = Vec::new();
    /// hist.write_msgpack(&mut buffer).unwrap();
    /// let restored = Histogram::read_msgpack(buffer.as_slice()).unwrap();
    ///
    /// // the same bins, so the bar chart looks the same
    /// assert_eq!(restored, hist);
    /// assert_eq!(restored.bars(), hist.bars());
    /// assert_eq!(restored.count(), 1000);
    /// ```
    pub fn read_msgpack<R>(reader: R) -> Result<Self, Box<dyn Error>>
    where
        R: Read,
    {
        let hist: Histogram = rmp_serde::decode::from_read(reader).map_err(Box::new)?;
        hist.validate()?;
        Ok(hist)
    }

    /// Write histogram to [MessagePack] format using a writer.
    ///
    /// [MessagePack]: https://msgpack.org/
    pub fn write_msgpack<W>(&self, writer: &mut W) -> Result<(), Box<dyn Error>>
    where
        W: Write,
    {
        rmp_serde::encode::write(writer, self).map_err(Box::new)?;
        Ok(())
    }
}

impl TryFrom<HistJson> for Histogram {
    type Error = HistogramError;

    fn try_from(h: HistJson) -> Result<Self, Self::Error> {
        let hist = Histogram {
            bins: h.bins,
            min: h.min,
            max: h.max,
            bin_size: h.bin_size,
        };
        hist.validate()?;
        Ok(hist)
    }
}

impl From<&Histogram> for HistJson {
    fn from(h: &Histogram) -> Self {
        HistJson {
            bars: h.bars(),
            bins: h.bins.clone(),
            min: h.min,
            max: h.max,
            bin_size: h.bin_size,
        }
    }
}
