//! Task list manager.
//!
//! Holds the ordered task collection, mirrored into the store under the
//! `tasks` key on every mutation. Filtering is a read-only projection and
//! never reorders.

mod model;

pub use model::{Task, TaskFilter, TaskId};

use crate::storage::{Persisted, Store};
use chrono::{SecondsFormat, Utc};
use log::*;

/// Storage key of the task collection.
pub const TASKS_KEY: &str = "tasks";

/// Hands out task ids shaped like millisecond timestamps.
///
/// Each id is at least the current clock reading and strictly greater than
/// the previous one, so rapid successive creation cannot collide.
///
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: TaskId,
}

impl IdGenerator {
    /// Return a generator that will never hand out `floor` or anything below.
    ///
    pub fn starting_after(floor: TaskId) -> Self {
        IdGenerator { last: floor }
    }

    /// Return the next id for the given clock reading.
    ///
    pub fn next_at(&mut self, now_millis: TaskId) -> TaskId {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Return the next id for the current wall clock.
    ///
    pub fn next(&mut self) -> TaskId {
        let now = Utc::now().timestamp_millis().max(0) as TaskId;
        self.next_at(now)
    }
}

/// Manages the persisted, ordered task collection.
///
pub struct TaskList {
    tasks: Persisted<Vec<Task>>,
    ids: IdGenerator,
}

impl TaskList {
    /// Load the collection from the store, starting empty if nothing usable
    /// is stored.
    ///
    pub fn load(store: &Store) -> Self {
        let tasks = Persisted::load(store, TASKS_KEY, Vec::<Task>::new());
        let floor = tasks.get().iter().map(|t| t.id).max().unwrap_or(0);
        debug!("Loaded {} tasks from store.", tasks.get().len());
        TaskList {
            tasks,
            ids: IdGenerator::starting_after(floor),
        }
    }

    /// Append a new active task with the trimmed text. Blank text is ignored.
    /// Returns the id of the new task.
    ///
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank task.");
            return None;
        }
        let task = Task {
            id: self.ids.next(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let id = task.id;
        info!("Adding task {} '{}'.", id, task.text);
        self.tasks.update(|tasks| tasks.push(task));
        Some(id)
    }

    /// Flip completion of the task with the id. Returns false if no such
    /// task exists, in which case nothing changes.
    ///
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("Toggle ignored, no task with id {}.", id);
            return false;
        };
        let completed = self.tasks.update(|tasks| {
            let task = &mut tasks[index];
            task.completed = !task.completed;
            task.completed
        });
        info!("Marked task {} as {}.", id, if completed { "completed" } else { "active" });
        true
    }

    /// Remove the task with the id. Returns false if no such task exists.
    ///
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("Delete ignored, no task with id {}.", id);
            return false;
        };
        self.tasks.update(|tasks| tasks.remove(index));
        info!("Deleted task {}.", id);
        true
    }

    /// Return the tasks passing the filter, in insertion order.
    ///
    pub fn filtered_view(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks().iter().filter(|t| filter.matches(t)).collect()
    }

    /// Return the number of tasks passing the filter.
    ///
    pub fn count(&self, filter: TaskFilter) -> usize {
        self.tasks().iter().filter(|t| filter.matches(t)).count()
    }

    /// Return the task with the id.
    ///
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == id)
    }

    /// Return every task, in insertion order.
    ///
    pub fn tasks(&self) -> &[Task] {
        self.tasks.get()
    }

    /// Return the number of tasks, whatever their state.
    ///
    pub fn len(&self) -> usize {
        self.tasks().len()
    }

    /// Return whether there are no tasks at all.
    ///
    pub fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks().iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use fake::{Fake, Faker};
    use std::collections::HashSet;

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    fn assert_partition(list: &TaskList) {
        let all = ids(&list.filtered_view(TaskFilter::All));
        let active = ids(&list.filtered_view(TaskFilter::Active));
        let completed = ids(&list.filtered_view(TaskFilter::Completed));
        assert_eq!(list.len(), all.len());
        assert_eq!(all.len(), active.len() + completed.len());
        assert!(active.iter().all(|id| !completed.contains(id)));
        let mut merged: Vec<TaskId> = active.iter().chain(completed.iter()).copied().collect();
        merged.sort_unstable();
        let mut sorted_all = all.clone();
        sorted_all.sort_unstable();
        assert_eq!(sorted_all, merged);
    }

    #[test]
    fn buy_milk_scenario() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        assert!(list.is_empty());

        let id = list.add_task("Buy milk").unwrap();
        assert_eq!(1, list.len());
        let task = list.get(id).unwrap();
        assert_eq!("Buy milk", task.text);
        assert!(!task.completed);

        assert!(list.toggle_task(id));
        assert!(list.get(id).unwrap().completed);
        assert!(list.filtered_view(TaskFilter::Active).is_empty());
        assert_eq!(vec![id], ids(&list.filtered_view(TaskFilter::Completed)));
    }

    #[test]
    fn blank_text_is_ignored() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        assert_eq!(None, list.add_task(""));
        assert_eq!(None, list.add_task("   "));
        assert_eq!(None, list.add_task("\t\n"));
        assert!(list.is_empty());
        assert!(store.try_read::<Vec<Task>>(TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn text_is_trimmed() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let id = list.add_task("  walk the dog ").unwrap();
        assert_eq!("walk the dog", list.get(id).unwrap().text);
    }

    #[test]
    fn created_at_is_iso_8601() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let id = list.add_task("Buy milk").unwrap();
        let created_at = &list.get(id).unwrap().created_at;
        assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
        assert!(created_at.ends_with('Z'));
    }

    #[test]
    fn order_is_preserved() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let a = list.add_task("a").unwrap();
        let b = list.add_task("b").unwrap();
        let c = list.add_task("c").unwrap();
        let d = list.add_task("d").unwrap();

        list.toggle_task(b);
        list.toggle_task(d);
        assert_eq!(vec![a, b, c, d], ids(&list.filtered_view(TaskFilter::All)));
        assert_eq!(vec![a, c], ids(&list.filtered_view(TaskFilter::Active)));
        assert_eq!(vec![b, d], ids(&list.filtered_view(TaskFilter::Completed)));

        list.delete_task(c);
        assert_eq!(vec![a, b, d], ids(&list.filtered_view(TaskFilter::All)));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let id = list.add_task("keep me").unwrap();
        assert!(!list.toggle_task(id + 1000));
        assert!(!list.delete_task(id + 1000));
        assert_eq!(1, list.len());
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn partition_holds_across_operations() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let mut created = Vec::new();
        for step in 0..60usize {
            match step % 5 {
                0 | 1 => {
                    let text: String = Faker.fake();
                    if let Some(id) = list.add_task(&format!("task {}", text)) {
                        created.push(id);
                    }
                }
                2 | 3 if !created.is_empty() => {
                    list.toggle_task(created[step % created.len()]);
                }
                4 if !created.is_empty() => {
                    let id = created.remove(step % created.len());
                    list.delete_task(id);
                }
                _ => {
                    list.add_task("   ");
                }
            }
            assert_partition(&list);
        }
    }

    #[test]
    fn mutations_are_persisted() {
        let store = Store::in_memory();
        let (a, b) = {
            let mut list = TaskList::load(&store);
            let a = list.add_task("first").unwrap();
            let b = list.add_task("second").unwrap();
            list.toggle_task(a);
            (a, b)
        };

        let mut reloaded = TaskList::load(&store);
        assert_eq!(2, reloaded.len());
        assert!(reloaded.get(a).unwrap().completed);
        assert!(!reloaded.get(b).unwrap().completed);

        reloaded.delete_task(a);
        let stored: Vec<Task> = store.read(TASKS_KEY, vec![]);
        assert_eq!(vec![b], stored.iter().map(|t| t.id).collect::<Vec<_>>());
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let backend = MemoryBackend::new();
        crate::storage::Backend::set_item(&backend, TASKS_KEY, "[{\"id\":").unwrap();
        let store = Store::new(backend);
        let mut list = TaskList::load(&store);
        assert!(list.is_empty());
        list.add_task("fresh start").unwrap();
        assert_eq!(1, store.read::<Vec<Task>>(TASKS_KEY, vec![]).len());
    }

    #[test]
    fn ids_are_unique_under_rapid_creation() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        let created: Vec<TaskId> = (0..500)
            .filter_map(|i| list.add_task(&format!("task {}", i)))
            .collect();
        let unique: HashSet<TaskId> = created.iter().copied().collect();
        assert_eq!(500, unique.len());
        assert!(created.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ids_continue_after_persisted_ones() {
        let store = Store::in_memory();
        let far_future = Task {
            id: u64::MAX / 2,
            text: "from the future".to_string(),
            completed: false,
            created_at: "2999-01-01T00:00:00.000Z".to_string(),
        };
        store.write(TASKS_KEY, &vec![far_future.clone()]);
        let mut list = TaskList::load(&store);
        let id = list.add_task("now").unwrap();
        assert_eq!(far_future.id + 1, id);
    }

    #[test]
    fn id_generator_is_monotonic() {
        let mut ids = IdGenerator::default();
        assert_eq!(1000, ids.next_at(1000));
        assert_eq!(1001, ids.next_at(1000));
        assert_eq!(1002, ids.next_at(999));
        assert_eq!(5000, ids.next_at(5000));
    }
}
