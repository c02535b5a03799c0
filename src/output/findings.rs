use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub host: String,
    pub port: u16,
    pub proto: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRecord {
    pub host: String,
    pub port: u16,
    pub proto: String,
    #[serde(rename = "type")]
    pub ntype: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRecord {
    pub host: String,
    pub port: u16,
    pub proto: String,
    pub user: String,
    pub pass: Option<String>,
    pub active: bool,
}

/// 接收扫描发现的记录
pub trait Reporter {
    fn report_service(&mut self, service: ServiceRecord);
    fn report_note(&mut self, note: NoteRecord);
    fn report_auth(&mut self, auth: AuthRecord);
}

/// 内存中的发现集合
#[derive(Debug, Default, Clone, Serialize)]
pub struct FindingStore {
    pub services: Vec<ServiceRecord>,
    pub notes: Vec<NoteRecord>,
    pub credentials: Vec<AuthRecord>,
}

impl FindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.notes.is_empty() && self.credentials.is_empty()
    }

    pub fn valid_credentials(&self) -> impl Iterator<Item = &AuthRecord> {
        self.credentials.iter().filter(|c| c.active)
    }

    pub fn locked_accounts(&self) -> impl Iterator<Item = &AuthRecord> {
        self.credentials.iter().filter(|c| !c.active)
    }
}

impl Reporter for FindingStore {
    fn report_service(&mut self, service: ServiceRecord) {
        if !self.services.contains(&service) {
            self.services.push(service);
        }
    }

    // 相同主机/端口/类型/数据的 note 只保留一条
    fn report_note(&mut self, note: NoteRecord) {
        if !self.notes.contains(&note) {
            self.notes.push(note);
        }
    }

    fn report_auth(&mut self, auth: AuthRecord) {
        self.credentials.push(auth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(host: &str, data: &str) -> NoteRecord {
        NoteRecord {
            host: host.into(),
            port: 1521,
            proto: "tcp".into(),
            ntype: "oracle.sid".into(),
            data: data.into(),
        }
    }

    #[test]
    fn duplicate_notes_are_ignored() {
        let mut store = FindingStore::new();
        store.report_note(note("10.0.0.5", "XE"));
        store.report_note(note("10.0.0.5", "XE"));
        store.report_note(note("10.0.0.5", "ORCL"));
        store.report_note(note("10.0.0.6", "XE"));
        assert_eq!(store.notes.len(), 3);
    }

    #[test]
    fn credentials_split_by_status() {
        let mut store = FindingStore::new();
        assert!(store.is_empty());
        store.report_auth(AuthRecord {
            host: "10.0.0.5".into(),
            port: 1521,
            proto: "tcp".into(),
            user: "XE/scott".into(),
            pass: Some("tiger".into()),
            active: true,
        });
        store.report_auth(AuthRecord {
            host: "10.0.0.5".into(),
            port: 1521,
            proto: "tcp".into(),
            user: "XE/outln".into(),
            pass: None,
            active: false,
        });
        assert_eq!(store.valid_credentials().count(), 1);
        assert_eq!(store.locked_accounts().next().unwrap().user, "XE/outln");
    }
}
