use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    Employee, EmployeeId, EvaluationId, EvaluationResult, EvaluationTemplate, LevelThreshold,
    TemplateId,
};
use super::repository::{RepositoryError, TalentRepository};

/// Whole persisted state, kept as one serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TalentSnapshot {
    #[serde(default)]
    pub employees: BTreeMap<EmployeeId, Employee>,
    #[serde(default)]
    pub templates: BTreeMap<TemplateId, EvaluationTemplate>,
    #[serde(default)]
    pub evaluations: BTreeMap<EvaluationId, EvaluationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_thresholds: Option<Vec<LevelThreshold>>,
}

impl TalentSnapshot {
    fn insert_employee(&mut self, employee: Employee) -> Result<Employee, RepositoryError> {
        if self.employees.contains_key(&employee.id) {
            return Err(RepositoryError::Conflict);
        }
        self.employees.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    fn insert_template(
        &mut self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError> {
        if self.templates.contains_key(&template.id) {
            return Err(RepositoryError::Conflict);
        }
        self.templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn update_template(&mut self, template: EvaluationTemplate) -> Result<(), RepositoryError> {
        match self.templates.get_mut(&template.id) {
            Some(slot) => {
                *slot = template;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn insert_evaluation(
        &mut self,
        evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError> {
        if self.evaluations.contains_key(&evaluation.id) {
            return Err(RepositoryError::Conflict);
        }
        self.evaluations
            .insert(evaluation.id.clone(), evaluation.clone());
        Ok(evaluation)
    }
}

fn lock(state: &Mutex<TalentSnapshot>) -> Result<MutexGuard<'_, TalentSnapshot>, RepositoryError> {
    state
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

/// Volatile backend for tests, demos, and servers without a data path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<TalentSnapshot>,
}

impl TalentRepository for MemoryStore {
    fn insert_employee(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        lock(&self.state)?.insert_employee(employee)
    }

    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(lock(&self.state)?.employees.get(id).cloned())
    }

    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(lock(&self.state)?.employees.values().cloned().collect())
    }

    fn insert_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError> {
        lock(&self.state)?.insert_template(template)
    }

    fn update_template(&self, template: EvaluationTemplate) -> Result<(), RepositoryError> {
        lock(&self.state)?.update_template(template)
    }

    fn template(&self, id: &TemplateId) -> Result<Option<EvaluationTemplate>, RepositoryError> {
        Ok(lock(&self.state)?.templates.get(id).cloned())
    }

    fn insert_evaluation(
        &self,
        evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError> {
        lock(&self.state)?.insert_evaluation(evaluation)
    }

    fn evaluation(&self, id: &EvaluationId) -> Result<Option<EvaluationResult>, RepositoryError> {
        Ok(lock(&self.state)?.evaluations.get(id).cloned())
    }

    fn evaluations(&self) -> Result<Vec<EvaluationResult>, RepositoryError> {
        Ok(lock(&self.state)?.evaluations.values().cloned().collect())
    }

    fn level_thresholds(&self) -> Result<Option<Vec<LevelThreshold>>, RepositoryError> {
        Ok(lock(&self.state)?.level_thresholds.clone())
    }

    fn save_level_thresholds(
        &self,
        thresholds: Vec<LevelThreshold>,
    ) -> Result<(), RepositoryError> {
        lock(&self.state)?.level_thresholds = Some(thresholds);
        Ok(())
    }
}

/// Backend that mirrors the snapshot into a single JSON document on disk.
///
/// Every mutation rewrites the file through a sibling temp file and a rename,
/// so a crash leaves either the old or the new document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<TalentSnapshot>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let snapshot = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => TalentSnapshot::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => TalentSnapshot::default(),
            Err(err) => return Err(err.into()),
        };

        debug!(
            path = %path.display(),
            employees = snapshot.employees.len(),
            evaluations = snapshot.evaluations.len(),
            "opened evaluation store"
        );

        Ok(Self {
            path,
            state: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut TalentSnapshot) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut guard = lock(&self.state)?;
        let mut next = guard.clone();
        let value = apply(&mut next)?;
        persist(&self.path, &next)?;
        *guard = next;
        Ok(value)
    }

    fn read<T>(&self, view: impl FnOnce(&TalentSnapshot) -> T) -> Result<T, RepositoryError> {
        Ok(view(&*lock(&self.state)?))
    }
}

fn persist(path: &Path, snapshot: &TalentSnapshot) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let payload = serde_json::to_vec_pretty(snapshot)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(&payload)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl TalentRepository for JsonFileStore {
    fn insert_employee(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        self.mutate(|state| state.insert_employee(employee))
    }

    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        self.read(|state| state.employees.get(id).cloned())
    }

    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        self.read(|state| state.employees.values().cloned().collect())
    }

    fn insert_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError> {
        self.mutate(|state| state.insert_template(template))
    }

    fn update_template(&self, template: EvaluationTemplate) -> Result<(), RepositoryError> {
        self.mutate(|state| state.update_template(template))
    }

    fn template(&self, id: &TemplateId) -> Result<Option<EvaluationTemplate>, RepositoryError> {
        self.read(|state| state.templates.get(id).cloned())
    }

    fn insert_evaluation(
        &self,
        evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError> {
        self.mutate(|state| state.insert_evaluation(evaluation))
    }

    fn evaluation(&self, id: &EvaluationId) -> Result<Option<EvaluationResult>, RepositoryError> {
        self.read(|state| state.evaluations.get(id).cloned())
    }

    fn evaluations(&self) -> Result<Vec<EvaluationResult>, RepositoryError> {
        self.read(|state| state.evaluations.values().cloned().collect())
    }

    fn level_thresholds(&self) -> Result<Option<Vec<LevelThreshold>>, RepositoryError> {
        self.read(|state| state.level_thresholds.clone())
    }

    fn save_level_thresholds(
        &self,
        thresholds: Vec<LevelThreshold>,
    ) -> Result<(), RepositoryError> {
        self.mutate(|state| {
            state.level_thresholds = Some(thresholds);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluations::domain::PerformanceLevel;

    fn employee(id: &str) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            name: "Lucía Ferrer".to_string(),
            department: "Engineering".to_string(),
            position: "Backend Developer".to_string(),
        }
    }

    #[test]
    fn memory_store_rejects_duplicate_employees() {
        let store = MemoryStore::default();
        store.insert_employee(employee("emp-1")).expect("first insert");

        assert!(matches!(
            store.insert_employee(employee("emp-1")),
            Err(RepositoryError::Conflict)
        ));
        assert_eq!(store.employees().expect("list").len(), 1);
    }

    #[test]
    fn memory_store_update_requires_existing_template() {
        let store = MemoryStore::default();
        let template = EvaluationTemplate {
            id: TemplateId::new("tpl-missing"),
            name: "Quarterly".to_string(),
            criteria: Vec::new(),
        };

        assert!(matches!(
            store.update_template(template),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("talent.json");

        {
            let store = JsonFileStore::open(&path).expect("open empty store");
            store.insert_employee(employee("emp-7")).expect("insert");
            store
                .save_level_thresholds(vec![LevelThreshold::new(PerformanceLevel::Low, 5.0)])
                .expect("save thresholds");
        }

        let reopened = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.path(), path.as_path());
        let stored = reopened
            .employee(&EmployeeId::new("emp-7"))
            .expect("fetch")
            .expect("employee persisted");
        assert_eq!(stored.department, "Engineering");
        assert_eq!(
            reopened.level_thresholds().expect("thresholds"),
            Some(vec![LevelThreshold::new(PerformanceLevel::Low, 5.0)])
        );
    }

    #[test]
    fn json_store_leaves_state_untouched_on_conflict() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("talent.json");
        let store = JsonFileStore::open(&path).expect("open");
        store.insert_employee(employee("emp-1")).expect("insert");

        assert!(matches!(
            store.insert_employee(employee("emp-1")),
            Err(RepositoryError::Conflict)
        ));

        let on_disk: TalentSnapshot =
            serde_json::from_slice(&fs::read(&path).expect("read file")).expect("valid json");
        assert_eq!(on_disk.employees.len(), 1);
    }

    #[test]
    fn json_store_reports_corrupt_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("talent.json");
        fs::write(&path, b"{ not json").expect("write garbage");

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
