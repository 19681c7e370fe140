//! Microphone capture backend (native, `microphone` feature).
//!
//! Records the default input device to a 16-bit WAV file under the
//! platform data directory. Pause gates the sample callback as well as
//! the stream, so paused time never reaches the file even on hosts whose
//! streams cannot pause.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;

use crate::recorder::{Permission, RecorderBackend};

type WavHandle = Arc<Mutex<Option<hound::WavWriter<BufWriter<File>>>>>;

/// Real audio capture for [`crate::DictationRecorder`].
pub struct CaptureBackend {
    out_dir: PathBuf,
    permission: Permission,
    stream: Option<cpal::Stream>,
    writer: WavHandle,
    writing: Arc<AtomicBool>,
    current: Option<PathBuf>,
    clips: u32,
}

impl CaptureBackend {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            permission: Permission::Undetermined,
            stream: None,
            writer: Arc::new(Mutex::new(None)),
            writing: Arc::new(AtomicBool::new(false)),
            current: None,
            clips: 0,
        }
    }

    /// Capture into `<data dir>/noteless/dictation/`.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("noteless")
            .join("dictation");
        Self::new(base)
    }

    fn open_input() -> Result<(cpal::Device, cpal::SupportedStreamConfig), String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "no input device available".to_string())?;
        let config = device
            .default_input_config()
            .map_err(|error| format!("failed to get default input config: {error}"))?;
        Ok((device, config))
    }
}

impl RecorderBackend for CaptureBackend {
    fn permission(&self) -> Permission {
        self.permission
    }

    /// Desktop hosts have no separate permission prompt; access is probed
    /// by opening the default input device.
    fn request_permission(&mut self) -> Permission {
        self.permission = match Self::open_input() {
            Ok(_) => Permission::Granted,
            Err(error) => {
                tracing::warn!("microphone unavailable: {error}");
                Permission::Denied
            }
        };
        self.permission
    }

    fn begin(&mut self) -> Result<(), String> {
        let (device, supported) = Self::open_input()?;
        let sample_format = supported.sample_format();
        let stream_config = supported.config();

        std::fs::create_dir_all(&self.out_dir)
            .map_err(|error| format!("failed to create recording directory: {error}"))?;
        self.clips += 1;
        let path = self.out_dir.join(format!(
            "dictation-{}-{}.wav",
            chrono::Utc::now().format("%Y%m%d-%H%M%S"),
            self.clips
        ));

        let spec = hound::WavSpec {
            channels: stream_config.channels,
            sample_rate: stream_config.sample_rate.0,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let wav = hound::WavWriter::create(&path, spec)
            .map_err(|error| format!("failed to create wav file: {error}"))?;
        *self.writer.lock().unwrap() = Some(wav);
        self.writing.store(true, Ordering::Relaxed);

        let error_callback = |error| {
            tracing::error!("input stream error: {error}");
        };

        let stream = match sample_format {
            SampleFormat::F32 => {
                let writer = self.writer.clone();
                let writing = self.writing.clone();
                device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[f32], _| {
                            write_samples(&writer, &writing, data.iter().map(|s| {
                                (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
                            }));
                        },
                        error_callback,
                        None,
                    )
                    .map_err(|error| format!("failed to build f32 input stream: {error}"))?
            }
            SampleFormat::I16 => {
                let writer = self.writer.clone();
                let writing = self.writing.clone();
                device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[i16], _| {
                            write_samples(&writer, &writing, data.iter().copied());
                        },
                        error_callback,
                        None,
                    )
                    .map_err(|error| format!("failed to build i16 input stream: {error}"))?
            }
            SampleFormat::U16 => {
                let writer = self.writer.clone();
                let writing = self.writing.clone();
                device
                    .build_input_stream(
                        &stream_config,
                        move |data: &[u16], _| {
                            write_samples(&writer, &writing, data.iter().map(|s| {
                                (i32::from(*s) - 32768) as i16
                            }));
                        },
                        error_callback,
                        None,
                    )
                    .map_err(|error| format!("failed to build u16 input stream: {error}"))?
            }
            other => return Err(format!("unsupported sample format: {other}")),
        };

        stream
            .play()
            .map_err(|error| format!("failed to start input stream: {error}"))?;
        self.stream = Some(stream);
        self.current = Some(path);
        Ok(())
    }

    fn pause(&mut self) {
        self.writing.store(false, Ordering::Relaxed);
        if let Some(stream) = &self.stream {
            // Not every host supports pausing; the writing gate covers those.
            let _ = stream.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(stream) = &self.stream {
            let _ = stream.play();
        }
        self.writing.store(true, Ordering::Relaxed);
    }

    fn finish(&mut self) -> Result<String, String> {
        self.writing.store(false, Ordering::Relaxed);
        self.stream = None;

        let wav = self.writer.lock().unwrap().take();
        if let Some(wav) = wav {
            wav.finalize()
                .map_err(|error| format!("failed to finalize wav file: {error}"))?;
        }
        let path = self
            .current
            .take()
            .ok_or_else(|| "no recording in progress".to_string())?;
        Ok(format!("file://{}", path.display()))
    }

    fn discard(&mut self) {
        self.writing.store(false, Ordering::Relaxed);
        self.stream = None;
        *self.writer.lock().unwrap() = None;
        if let Some(path) = self.current.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

fn write_samples(
    writer: &WavHandle,
    writing: &Arc<AtomicBool>,
    samples: impl Iterator<Item = i16>,
) {
    if !writing.load(Ordering::Relaxed) {
        return;
    }
    if let Some(wav) = writer.lock().unwrap().as_mut() {
        for sample in samples {
            if let Err(error) = wav.write_sample(sample) {
                tracing::error!("failed to write sample: {error}");
                return;
            }
        }
    }
}
