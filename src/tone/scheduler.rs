//! Deferred tasks on the audio thread's sample clock.
//!
//! Storage is sized once at construction; scheduling never grows it, so the
//! render path stays allocation free. When full, [`Scheduler::schedule`]
//! refuses the task and the caller falls back to the voice's own release
//! handling.

use super::message::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Hard-stop the voice playing this session, if it still exists.
    Stop(SessionId),
}

impl Task {
    pub fn session(&self) -> SessionId {
        match *self {
            Task::Stop(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TaskHandle,
    due: u64,
    task: Task,
}

pub struct Scheduler {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl Scheduler {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_handle: 0,
        }
    }

    /// Queue `task` to run once the clock reaches `due` (in samples).
    pub fn schedule(&mut self, due: u64, task: Task) -> Option<TaskHandle> {
        if self.entries.len() == self.entries.capacity() {
            return None;
        }
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, due, task });
        Some(handle)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every task targeting `id`. Returns how many were removed.
    pub fn cancel_for(&mut self, id: SessionId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.task.session() != id);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Task> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(index).task)
    }

    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut s = Scheduler::with_capacity(8);
        s.schedule(300, Task::Stop(3));
        s.schedule(100, Task::Stop(1));
        s.schedule(200, Task::Stop(2));

        assert_eq!(s.pop_due(50), None);
        assert_eq!(s.pop_due(250), Some(Task::Stop(1)));
        assert_eq!(s.pop_due(250), Some(Task::Stop(2)));
        assert_eq!(s.pop_due(250), None);
        assert_eq!(s.next_due(), Some(300));
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut s = Scheduler::with_capacity(8);
        let handle = s.schedule(10, Task::Stop(1)).unwrap();
        s.schedule(10, Task::Stop(2));
        s.schedule(20, Task::Stop(2));

        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));
        assert_eq!(s.cancel_for(2), 2);
        assert_eq!(s.pop_due(100), None);
    }

    #[test]
    fn full_scheduler_refuses_without_growing() {
        let mut s = Scheduler::with_capacity(2);
        let capacity = s.capacity();
        for i in 0..capacity as u64 {
            assert!(s.schedule(i, Task::Stop(i)).is_some());
        }
        assert!(s.schedule(99, Task::Stop(99)).is_none());
        assert_eq!(s.capacity(), capacity);

        s.clear();
        assert!(s.is_empty());
    }
}
