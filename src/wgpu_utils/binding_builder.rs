// src/wgpu_utils/binding_builder.rs
//! Builders for bind group layouts and bind groups
//!
//! Bindings are numbered in the order they are added, so the layout builder
//! and the bind group builder only need to agree on ordering.

/// A bind group layout together with the entries it was created from.
///
/// Keeping the entries around lets [`BindGroupBuilder`] assign resources to
/// the matching binding slots without restating the indices.
pub struct BindGroupLayoutWithDesc {
    pub layout: wgpu::BindGroupLayout,
    pub entries: Vec<wgpu::BindGroupLayoutEntry>,
}

pub struct BindGroupLayoutBuilder {
    entries: Vec<wgpu::BindGroupLayoutEntry>,
    next_binding_index: u32,
}

impl BindGroupLayoutBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_binding_index: 0,
        }
    }

    pub fn binding(mut self, visibility: wgpu::ShaderStages, ty: wgpu::BindingType) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding: self.next_binding_index,
            visibility,
            ty,
            count: None,
        });
        self.next_binding_index += 1;
        self
    }

    /// Adds a binding visible to the vertex stage only.
    pub fn next_binding_vertex(self, ty: wgpu::BindingType) -> Self {
        self.binding(wgpu::ShaderStages::VERTEX, ty)
    }

    /// Adds a binding visible to the fragment stage only.
    pub fn next_binding_fragment(self, ty: wgpu::BindingType) -> Self {
        self.binding(wgpu::ShaderStages::FRAGMENT, ty)
    }

    /// Adds a binding visible to both rendering stages.
    pub fn next_binding_rendering(self, ty: wgpu::BindingType) -> Self {
        self.binding(
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty,
        )
    }

    pub fn create(self, device: &wgpu::Device, label: &str) -> BindGroupLayoutWithDesc {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &self.entries,
        });
        BindGroupLayoutWithDesc {
            layout,
            entries: self.entries,
        }
    }
}

impl Default for BindGroupLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BindGroupBuilder<'a> {
    layout: &'a BindGroupLayoutWithDesc,
    resources: Vec<wgpu::BindingResource<'a>>,
}

impl<'a> BindGroupBuilder<'a> {
    pub fn new(layout: &'a BindGroupLayoutWithDesc) -> Self {
        Self {
            layout,
            resources: Vec::new(),
        }
    }

    /// Assigns a resource to the next binding slot, in layout order.
    pub fn resource(mut self, resource: wgpu::BindingResource<'a>) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn texture(self, view: &'a wgpu::TextureView) -> Self {
        self.resource(wgpu::BindingResource::TextureView(view))
    }

    pub fn sampler(self, sampler: &'a wgpu::Sampler) -> Self {
        self.resource(wgpu::BindingResource::Sampler(sampler))
    }

    pub fn create(self, device: &wgpu::Device, label: &str) -> wgpu::BindGroup {
        assert_eq!(
            self.resources.len(),
            self.layout.entries.len(),
            "bind group resource count does not match layout"
        );

        let entries: Vec<wgpu::BindGroupEntry> = self
            .resources
            .into_iter()
            .zip(self.layout.entries.iter())
            .map(|(resource, entry)| wgpu::BindGroupEntry {
                binding: entry.binding,
                resource,
            })
            .collect();

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layout.layout,
            entries: &entries,
        })
    }
}
