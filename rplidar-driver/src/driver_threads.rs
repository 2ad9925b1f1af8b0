use crate::constants::{FRAME_CHANNEL_SIZE, POLL_BACKOFF_MS};
use crate::driver::LidarDriver;
use crate::session::DeviceSession;
use crate::time::sleep_ms;
use crossbeam_channel::{bounded, Receiver, Sender};
use rplidar_data::ScanFrame;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Struct that owns the thread polling a session.
pub struct SessionThread {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) poll_thread: Option<JoinHandle<()>>,
}

pub(crate) fn poll_frames<D: LidarDriver>(
    mut session: DeviceSession<D>,
    frame_tx: mpsc::SyncSender<ScanFrame>,
    terminator_rx: Receiver<bool>,
) {
    while !do_terminate(&terminator_rx) {
        let scan = match session.poll() {
            Some(scan) => scan,
            None => {
                sleep_ms(POLL_BACKOFF_MS);
                continue;
            }
        };
        match frame_tx.try_send(scan) {
            Ok(()) => (),
            Err(mpsc::TrySendError::Full(scan)) => {
                log::warn!("Frame channel is full, dropping frame {}", scan.sequence);
            }
            Err(mpsc::TrySendError::Disconnected(_)) => {
                log::debug!("Frame receiver is gone, stopping the session thread");
                break;
            }
        }
    }
    session.close();
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Moves `session` into a thread that polls it continuously.
///
/// Frames arrive on the returned receiver in sequence order. The session is
/// closed on the polling thread when the returned [`SessionThread`] is
/// dropped or the receiver goes away.
pub fn run_session<D: LidarDriver + Send + 'static>(
    session: DeviceSession<D>,
) -> (SessionThread, mpsc::Receiver<ScanFrame>) {
    let (terminator_tx, terminator_rx) = bounded(1);
    let (frame_tx, frame_rx) = mpsc::sync_channel::<ScanFrame>(FRAME_CHANNEL_SIZE);

    let poll_thread = Some(std::thread::spawn(move || {
        poll_frames(session, frame_tx, terminator_rx);
    }));

    let session_thread = SessionThread {
        terminator_tx,
        poll_thread,
    };
    (session_thread, frame_rx)
}

/// Function to join the session thread.
/// This function is automatically called when `session_thread` is dropped.
pub fn join(session_thread: &mut SessionThread) {
    // fails only if the thread already left its loop
    let _ = session_thread.terminator_tx.try_send(true);

    if let Some(thread) = session_thread.poll_thread.take() {
        if thread.join().is_err() {
            log::error!("Session thread panicked");
        }
    }
}

impl Drop for SessionThread {
    fn drop(&mut self) {
        join(self);
    }
}
