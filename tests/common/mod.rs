pub mod synthetic_recording;
