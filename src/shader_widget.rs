//! Shader widget bridging the cube pair into the wgpu renderer.
//!
//! Each frame, the application view captures an immutable snapshot of both
//! cubes' drawable instances; the widget hands that snapshot to the
//! [`Renderer`] kept in the shader storage. All interaction happens through
//! the move-button pads, so the widget itself handles no events.

use iced::Rectangle;
use iced::mouse;
use iced::widget::shader::{self, wgpu};

use crate::camera::{Projection, ViewAngle};
use crate::pair::{CubeId, CubePair};
use crate::renderer::{InstanceRaw, Renderer, generate_instances};

/// Custom primitive carrying one frame's snapshot of both cube scenes.
#[derive(Debug, Clone)]
pub(crate) struct CubePairPrimitive {
    instances: Vec<InstanceRaw>,
    split: u32,
    projection: Projection,
    view_angles: [ViewAngle; 2],
}

impl shader::Primitive for CubePairPrimitive {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        storage: &mut shader::Storage,
        bounds: &Rectangle,
        viewport: &shader::Viewport,
    ) {
        if !storage.has::<Renderer>() {
            let renderer = Renderer::new(device, format, *bounds, viewport.physical_size());
            storage.store(renderer);
        }
        let renderer = storage.get_mut::<Renderer>().unwrap();
        renderer.resize(device, *bounds, viewport.physical_size());
        renderer.upload_instances(queue, &self.instances, self.split);
        renderer.update_cameras(queue, &self.projection, self.view_angles);
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        storage: &shader::Storage,
        target: &wgpu::TextureView,
        _clip_bounds: &Rectangle<u32>,
    ) {
        let renderer = storage.get::<Renderer>().unwrap();
        renderer.render(encoder, target);
    }
}

/// The shader program; rebuilt by the view on every state change.
#[derive(Debug)]
pub(crate) struct CubePairProgram {
    primitive: CubePairPrimitive,
}

impl CubePairProgram {
    pub(crate) fn new(pair: &CubePair) -> Self {
        let primary = pair.cube(CubeId::Primary);
        let secondary = pair.cube(CubeId::Secondary);
        let mut instances = generate_instances(primary);
        let split = instances.len() as u32;
        instances.extend(generate_instances(secondary));
        Self {
            primitive: CubePairPrimitive {
                instances,
                split,
                projection: Projection::default(),
                view_angles: [primary.view_angle, secondary.view_angle],
            },
        }
    }
}

impl<Message> shader::Program<Message> for CubePairProgram {
    type State = ();
    type Primitive = CubePairPrimitive;

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        _bounds: Rectangle,
    ) -> Self::Primitive {
        self.primitive.clone()
    }
}
