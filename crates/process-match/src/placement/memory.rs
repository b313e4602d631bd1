use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Assignment, AssignmentId, EmployeeProfile, Process};
use super::store::{PlacementStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    // Keyed by process name, which the catalog validator guarantees unique.
    processes: BTreeMap<String, Process>,
    // Insertion order, oldest first; readers reverse for newest-first.
    assignments: Vec<Assignment>,
}

/// Reference [`PlacementStore`] keeping both tables behind a single mutex.
///
/// One lock scope per trait method is what makes the conditional vacancy
/// decrement and the multi-leg reassignment atomic: no caller can observe a
/// slot taken without its assignment row, or the reverse.
#[derive(Debug, Default, Clone)]
pub struct MemoryPlacementStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryPlacementStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("placement store mutex poisoned".to_string()))
    }
}

impl PlacementStore for MemoryPlacementStore {
    fn replace_catalog(&self, processes: Vec<Process>) -> Result<usize, StoreError> {
        let mut tables = self.lock()?;
        tables.processes = processes
            .into_iter()
            .map(|process| (process.name.clone(), process))
            .collect();
        Ok(tables.processes.len())
    }

    fn catalog(&self) -> Result<Vec<Process>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.processes.values().cloned().collect())
    }

    fn process(&self, name: &str) -> Result<Option<Process>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.processes.get(name).cloned())
    }

    fn record_placement(&self, assignment: Assignment) -> Result<Assignment, StoreError> {
        let mut tables = self.lock()?;
        let duplicate = tables
            .assignments
            .iter()
            .any(|existing| existing.employee.email == assignment.employee.email);
        if duplicate {
            return Err(StoreError::DuplicateEmail(assignment.employee.email));
        }

        if let Some(name) = assignment.process.as_deref() {
            let process = tables
                .processes
                .get_mut(name)
                .ok_or_else(|| StoreError::ProcessNotFound(name.to_string()))?;
            if process.vacancy == 0 {
                return Err(StoreError::SlotsExhausted(name.to_string()));
            }
            process.vacancy -= 1;
        }

        tables.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .assignments
            .iter()
            .find(|record| &record.id == id)
            .cloned())
    }

    fn assignment_by_email(&self, email: &str) -> Result<Option<Assignment>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .assignments
            .iter()
            .find(|record| record.employee.email == email)
            .cloned())
    }

    fn assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.assignments.iter().rev().cloned().collect())
    }

    fn update_assignment(
        &self,
        id: &AssignmentId,
        employee: EmployeeProfile,
        target: Option<&str>,
    ) -> Result<Assignment, StoreError> {
        let mut tables = self.lock()?;
        let index = tables
            .assignments
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| StoreError::AssignmentNotFound(id.0.clone()))?;

        let duplicate = tables
            .assignments
            .iter()
            .any(|record| record.id != *id && record.employee.email == employee.email);
        if duplicate {
            return Err(StoreError::DuplicateEmail(employee.email));
        }

        let current = tables.assignments[index].process.clone();
        let moving = current.as_deref() != target;
        if moving {
            // Take the target slot first; every `?` below this point must
            // fire before any table is touched.
            if let Some(name) = target {
                let process = tables
                    .processes
                    .get_mut(name)
                    .ok_or_else(|| StoreError::ProcessNotFound(name.to_string()))?;
                if process.vacancy == 0 {
                    return Err(StoreError::SlotsExhausted(name.to_string()));
                }
                process.vacancy -= 1;
            }
            // The previous process may have left the catalog with a
            // re-import; its slot simply vanishes then.
            if let Some(name) = current.as_deref() {
                if let Some(process) = tables.processes.get_mut(name) {
                    process.vacancy = process.vacancy.saturating_add(1);
                }
            }
        }

        let record = &mut tables.assignments[index];
        record.employee = employee;
        record.process = target.map(str::to_string);
        Ok(record.clone())
    }

    fn delete_assignment(&self, id: &AssignmentId) -> Result<Assignment, StoreError> {
        let mut tables = self.lock()?;
        let index = tables
            .assignments
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| StoreError::AssignmentNotFound(id.0.clone()))?;

        let record = tables.assignments.remove(index);
        if let Some(name) = record.process.as_deref() {
            if let Some(process) = tables.processes.get_mut(name) {
                process.vacancy = process.vacancy.saturating_add(1);
            }
        }
        Ok(record)
    }
}
