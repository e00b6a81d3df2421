use r2r::QosProfile;

// Generic ROS2 Publisher wrapper
pub struct Publisher<T>
where
    T: r2r::WrappedTypesupport,
{
    inner: r2r::Publisher<T>,
    topic: String,
}

impl<T> Publisher<T>
where
    T: r2r::WrappedTypesupport + 'static,
{
    // Advertise `topic` with the given QoS
    pub fn new(node: &mut r2r::Node, topic: &str, qos: QosProfile) -> Result<Self, r2r::Error> {
        let inner = node.create_publisher::<T>(topic, qos)?;
        Ok(Publisher {
            inner,
            topic: topic.to_string(),
        })
    }

    // Topic this publisher was advertised on
    pub fn topic(&self) -> &str {
        &self.topic
    }

    // Publish a message, no acknowledgement is awaited
    pub fn publish(&self, message: &T) -> Result<(), r2r::Error> {
        self.inner.publish(message)
    }
}
