// Organization associated with a project (funding body, partner, operator)

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    name: String,
    /// Names of the projects this organization takes part in
    involved_projects: Vec<String>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Organization {
            name: name.into(),
            involved_projects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn involved_projects(&self) -> &[String] {
        &self.involved_projects
    }

    pub fn add_project(&mut self, project_name: impl Into<String>) {
        self.involved_projects.push(project_name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_project_keeps_order() {
        let mut org = Organization::new("ARENA");
        assert!(org.involved_projects().is_empty());

        org.add_project("Hornsdale");
        org.add_project("Wind Farm");
        assert_eq!(org.name(), "ARENA");
        assert_eq!(org.involved_projects(), ["Hornsdale", "Wind Farm"]);
    }
}
