/// A texture reference on a material slot.
///
/// Paths arrive already resolved by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTexture {
    pub path: String,
    /// UV set the texture samples; None means the mesh's default set
    pub uv_set: Option<String>,
}

impl MaterialTexture {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            uv_set: None,
        }
    }

    #[must_use]
    pub fn with_uv_set(mut self, uv_set: &str) -> Self {
        self.uv_set = Some(uv_set.to_string());
        self
    }

    #[inline]
    #[must_use]
    pub fn uses_default_uv_set(&self) -> bool {
        self.uv_set.is_none()
    }
}

/// Material as handed over by the provider, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Material {
    pub name: String,
    pub ambient: Option<MaterialTexture>,
    pub diffuse: Option<MaterialTexture>,
    pub emissive: Option<MaterialTexture>,
    pub specular: Option<MaterialTexture>,
}

impl Material {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_diffuse(mut self, texture: MaterialTexture) -> Self {
        self.diffuse = Some(texture);
        self
    }

    /// Iterates the populated texture slots.
    pub fn textures(&self) -> impl Iterator<Item = &MaterialTexture> {
        [&self.ambient, &self.diffuse, &self.emissive, &self.specular]
            .into_iter()
            .flatten()
    }
}
