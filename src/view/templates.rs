use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::{fs, io};

use ramhorns::{Content, Template};
use spdlog::debug;

/// Renders a named template with a context. Template ids are paths relative
/// to the template root, e.g. `cards/news-card.html`.
pub trait TemplateEngine {
    fn render<C: Content>(&self, template_id: &str, context: &C) -> io::Result<String>;
}

pub fn compile_template(template_id: &str, source: String) -> io::Result<Template<'static>> {
    match Template::new(source) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing template {}: {}", template_id, e))),
    }
}

/// Mustache templates read from a directory, compiled on first use and kept
/// for the rest of the build.
pub struct TemplateDir {
    dir: PathBuf,
    compiled: RefCell<HashMap<String, Rc<Template<'static>>>>,
}

impl TemplateDir {
    pub fn new(dir: &Path) -> TemplateDir {
        TemplateDir {
            dir: dir.to_path_buf(),
            compiled: RefCell::new(HashMap::new()),
        }
    }

    fn read_template(&self, template_id: &str) -> io::Result<String> {
        if template_id.contains("..") {
            return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid template id {}", template_id)));
        }

        let full_path = self.dir.join(template_id);
        match fs::read_to_string(&full_path) {
            Ok(s) => Ok(s),
            Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
        }
    }

    fn template(&self, template_id: &str) -> io::Result<Rc<Template<'static>>> {
        if let Some(template) = self.compiled.borrow().get(template_id) {
            return Ok(template.clone());
        }

        debug!("Compiling template {}", template_id);
        let source = self.read_template(template_id)?;
        let template = Rc::new(compile_template(template_id, source)?);
        self.compiled.borrow_mut().insert(template_id.to_string(), template.clone());
        Ok(template)
    }
}

impl TemplateEngine for TemplateDir {
    fn render<C: Content>(&self, template_id: &str, context: &C) -> io::Result<String> {
        let template = self.template(template_id)?;
        Ok(template.render(context))
    }
}
