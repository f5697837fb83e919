/* ********************************************************************** **
**  This file is part of matops.                                          **
**                                                                        **
**  matops is free software: you can redistribute it and/or modify it     **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
** ********************************************************************** */

use crate::FailResult;
use crate::util::lock;

use std::sync::Mutex;
use std::sync::mpsc::{self, Sender, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Collapses bursts of values into the last one.
///
/// A background thread waits for a value, then keeps waiting until `window`
/// passes without another one arriving. Only then is the callback invoked,
/// with the latest value and the number of values it stands in for.
pub struct Debouncer<T> {
    // Mutex only so that the Debouncer can be shared between threads.
    // `None` once shutting down.
    sender: Mutex<Option<Sender<T>>>,
    thread: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn<F>(name: &str, window: Duration, fire: F) -> FailResult<Self>
    where F: FnMut(T, usize) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run(receiver, window, fire))?;

        Ok(Debouncer {
            sender: Mutex::new(Some(sender)),
            thread: Some(thread),
        })
    }

    /// Start or restart the quiet window with a new value.
    ///
    /// Returns `false` if the background thread is gone.
    pub fn push(&self, value: T) -> bool {
        match &*lock(&self.sender) {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }
}

fn run<T, F>(receiver: Receiver<T>, window: Duration, mut fire: F)
where F: FnMut(T, usize),
{
    // outer loop: idle, waiting for the first value of a burst
    while let Ok(first) = receiver.recv() {
        let mut latest = first;
        let mut count = 1;
        loop {
            match receiver.recv_timeout(window) {
                Ok(value) => {
                    latest = value;
                    count += 1;
                },
                Err(RecvTimeoutError::Timeout) => break,
                // owner is gone; nobody is left to care about the result
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
        trace!("debounce window closed after {} value(s)", count);
        fire(latest, count);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        lock(&self.sender).take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("debounce thread panicked");
            }
        }
    }
}
