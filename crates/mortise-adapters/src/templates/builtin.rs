//! Compiled-in template bodies.
//!
//! Bodies target an ASP.NET Core solution (MediatR handlers, AutoMapper
//! profiles, FluentValidation, Sieve filtering, MassTransit consumers).
//! Marker comments are part of the bodies; incremental commands find their
//! insertion points through them.

use mortise_core::{application::ports::TemplateProvider, domain::TemplateId, error::MortiseResult};

/// Provider backed by the bodies in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateProvider for BuiltinTemplates {
    fn body(&self, id: TemplateId) -> MortiseResult<String> {
        Ok(builtin_body(id).to_string())
    }
}

/// The built-in body for `id`.
pub fn builtin_body(id: TemplateId) -> &'static str {
    match id {
        TemplateId::Entity => ENTITY,
        TemplateId::EntityProperty => ENTITY_PROPERTY,
        TemplateId::EntityForeignKeyProperty => ENTITY_FOREIGN_KEY_PROPERTY,
        TemplateId::ReadDto => READ_DTO,
        TemplateId::ManipulationDto => MANIPULATION_DTO,
        TemplateId::DerivedDto => DERIVED_DTO,
        TemplateId::DtoProperty => DTO_PROPERTY,
        TemplateId::ManipulationValidator => MANIPULATION_VALIDATOR,
        TemplateId::DerivedValidator => DERIVED_VALIDATOR,
        TemplateId::Profile => PROFILE,
        TemplateId::ApiRoutes => API_ROUTES,
        TemplateId::EntityRoutes => ENTITY_ROUTES,
        TemplateId::Controller => CONTROLLER,
        TemplateId::AuthAttributes => AUTH_ATTRIBUTES,
        TemplateId::EndpointDocs => ENDPOINT_DOCS,
        TemplateId::EndpointDocsAuth => ENDPOINT_DOCS_AUTH,
        TemplateId::EndpointAddRecord => ENDPOINT_ADD_RECORD,
        TemplateId::EndpointGetRecord => ENDPOINT_GET_RECORD,
        TemplateId::EndpointGetList => ENDPOINT_GET_LIST,
        TemplateId::EndpointUpdateRecord => ENDPOINT_UPDATE_RECORD,
        TemplateId::EndpointPatchRecord => ENDPOINT_PATCH_RECORD,
        TemplateId::EndpointDeleteRecord => ENDPOINT_DELETE_RECORD,
        TemplateId::EndpointAddList => ENDPOINT_ADD_LIST,
        TemplateId::QueryGetRecord => QUERY_GET_RECORD,
        TemplateId::QueryGetList => QUERY_GET_LIST,
        TemplateId::CommandAddRecord => COMMAND_ADD_RECORD,
        TemplateId::CommandAddList => COMMAND_ADD_LIST,
        TemplateId::CommandUpdateRecord => COMMAND_UPDATE_RECORD,
        TemplateId::CommandPatchRecord => COMMAND_PATCH_RECORD,
        TemplateId::CommandDeleteRecord => COMMAND_DELETE_RECORD,
        TemplateId::AdHocFeature => AD_HOC_FEATURE,
        TemplateId::IntegrationTest => INTEGRATION_TEST,
        TemplateId::FunctionalTest => FUNCTIONAL_TEST,
        TemplateId::FunctionalAuthTests => FUNCTIONAL_AUTH_TESTS,
        TemplateId::Fake => FAKE,
        TemplateId::Consumer => CONSUMER,
        TemplateId::ConsumerDbMembers => CONSUMER_DB_MEMBERS,
        TemplateId::TestFixture => TEST_FIXTURE,
        TemplateId::ConsumerRegistration => CONSUMER_REGISTRATION,
        TemplateId::UsingDirective => USING_DIRECTIVE,
    }
}

// ── Domain ────────────────────────────────────────────────────────────────────

const ENTITY: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using Sieve.Attributes;
using System.ComponentModel.DataAnnotations;
using System.ComponentModel.DataAnnotations.Schema;
using System.Runtime.Serialization;
using System.Text.Json.Serialization;

public class {{ENTITY}}
{
{{PROPERTIES}}

    // add-on property marker - Display Your Properties Here
}
"#;

const ENTITY_PROPERTY: &str = "{{ATTRIBUTES}}    public {{TYPE}} {{NAME}} { get; set; }";

const ENTITY_FOREIGN_KEY_PROPERTY: &str = r#"{{ATTRIBUTES}}    [JsonIgnore]
    [IgnoreDataMember]
    [ForeignKey("{{FOREIGN_ENTITY}}")]
    public {{TYPE}} {{NAME}} { get; set; }
    public {{FOREIGN_ENTITY}} {{FOREIGN_ENTITY}} { get; set; }"#;

const READ_DTO: &str = r#"namespace {{NAMESPACE}};

using System;
using System.Collections.Generic;

public class {{DTO}}
{
{{PROPERTIES}}

    // add-on property marker - Display Your Properties Here
}
"#;

const MANIPULATION_DTO: &str = r#"namespace {{NAMESPACE}};

using System;
using System.Collections.Generic;

public abstract class {{DTO}}
{
{{PROPERTIES}}

    // add-on property marker - Display Your Properties Here
}
"#;

const DERIVED_DTO: &str = r#"namespace {{NAMESPACE}};

public class {{DTO}} : {{BASE_DTO}}
{
}
"#;

const DTO_PROPERTY: &str = "    public {{TYPE}} {{NAME}} { get; set; }";

const MANIPULATION_VALIDATOR: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using FluentValidation;

public class {{VALIDATOR}}<T> : AbstractValidator<T> where T : {{DTO}}
{
    public {{VALIDATOR}}()
    {
        // rules shared by creation and update go here
    }
}
"#;

const DERIVED_VALIDATOR: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using FluentValidation;

public class {{VALIDATOR}} : {{BASE_VALIDATOR}}<{{DTO}}>
{
    public {{VALIDATOR}}()
    {
    }
}
"#;

const PROFILE: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{ENTITY_NAMESPACE}};
using AutoMapper;

public class {{PROFILE}} : Profile
{
    public {{PROFILE}}()
    {
        CreateMap<{{ENTITY}}, {{READ_DTO}}>()
            .ReverseMap();
        CreateMap<{{CREATION_DTO}}, {{ENTITY}}>();
        CreateMap<{{UPDATE_DTO}}, {{ENTITY}}>()
            .ReverseMap();
    }
}
"#;

// ── Routes and controller ─────────────────────────────────────────────────────

const API_ROUTES: &str = r#"namespace {{NAMESPACE}};

public class ApiRoutes
{
    public const string Base = "api";
    public const string Health = Base + "/health";

    // new api route marker - do not delete
}
"#;

const ENTITY_ROUTES: &str = r#"
    public static class {{ENTITY_PLURAL}}
    {
        public const string {{PK_NAME}} = "{{{PK_PARAM}}}";
        public const string GetList = Base + "/{{ROUTE}}";
        public const string GetRecord = Base + "/{{ROUTE}}/{{{PK_PARAM}}}";
        public const string Create = Base + "/{{ROUTE}}";
        public const string CreateBatch = Base + "/{{ROUTE}}/batch";
        public const string Delete = Base + "/{{ROUTE}}/{{{PK_PARAM}}}";
        public const string Put = Base + "/{{ROUTE}}/{{{PK_PARAM}}}";
        public const string Patch = Base + "/{{ROUTE}}/{{{PK_PARAM}}}";
    }
"#;

const CONTROLLER: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{FEATURE_NAMESPACE}};
using MediatR;
using Microsoft.AspNetCore.Authorization;
using Microsoft.AspNetCore.JsonPatch;
using Microsoft.AspNetCore.Mvc;
using Microsoft.AspNetCore.Mvc.ModelBinding;
using Sieve.Models;
using System.Collections.Generic;
using System.Threading.Tasks;

[ApiController]
[Route("api/{{ROUTE}}")]
[ApiVersion("1.0")]
public sealed class {{CONTROLLER}} : ControllerBase
{
    private readonly IMediator _mediator;

    public {{CONTROLLER}}(IMediator mediator)
    {
        _mediator = mediator;
    }

    // endpoint marker - do not delete this comment
}
"#;

const AUTH_ATTRIBUTES: &str = "    [Authorize(Policy = \"{{PERMISSION}}\")]\n";

const ENDPOINT_DOCS: &str = r#"    /// <summary>
    /// {{DOC_SUMMARY}}
    /// </summary>
    /// <response code="{{DOC_STATUS}}">{{DOC_STATUS_TEXT}}</response>
{{DOC_AUTH}}    /// <response code="500">There was an error on the server while processing the request.</response>
"#;

const ENDPOINT_DOCS_AUTH: &str = r#"    /// <response code="401">This request was not able to be authenticated.</response>
    /// <response code="403">The required permissions to access this resource were not present in the given request.</response>
"#;

const ENDPOINT_ADD_RECORD: &str = r#"
{{DOCS}}{{AUTH}}    [Consumes("application/json")]
    [Produces("application/json")]
    [HttpPost(Name = "{{ROUTE_NAME}}")]
    public async Task<ActionResult<{{READ_DTO}}>> {{ROUTE_NAME}}([FromBody] {{CREATION_DTO}} {{ENTITY_LOWER}}ForCreation)
    {
        var command = new {{FEATURE}}.{{RECORD}}({{ENTITY_LOWER}}ForCreation);
        var commandResponse = await _mediator.Send(command);

        return CreatedAtRoute("Get{{ENTITY}}",
            new { commandResponse.{{PK_NAME}} },
            commandResponse);
    }
"#;

const ENDPOINT_GET_RECORD: &str = r#"
{{DOCS}}{{AUTH}}    [Produces("application/json")]
    [HttpGet("{{{PK_PARAM}}}", Name = "{{ROUTE_NAME}}")]
    public async Task<ActionResult<{{READ_DTO}}>> {{ROUTE_NAME}}({{PK_TYPE}} {{PK_PARAM}})
    {
        var query = new {{FEATURE}}.{{RECORD}}({{PK_PARAM}});
        var queryResponse = await _mediator.Send(query);

        return Ok(queryResponse);
    }
"#;

const ENDPOINT_GET_LIST: &str = r#"
{{DOCS}}{{AUTH}}    [Produces("application/json")]
    [HttpGet(Name = "{{ROUTE_NAME}}")]
    public async Task<ActionResult<IEnumerable<{{READ_DTO}}>>> {{ROUTE_NAME}}([FromQuery] SieveModel parameters)
    {
        var query = new {{FEATURE}}.{{RECORD}}(parameters);
        var queryResponse = await _mediator.Send(query);

        return Ok(queryResponse);
    }
"#;

const ENDPOINT_UPDATE_RECORD: &str = r#"
{{DOCS}}{{AUTH}}    [Produces("application/json")]
    [HttpPut("{{{PK_PARAM}}}", Name = "{{ROUTE_NAME}}")]
    public async Task<IActionResult> {{ROUTE_NAME}}({{PK_TYPE}} {{PK_PARAM}}, {{UPDATE_DTO}} {{ENTITY_LOWER}})
    {
        var command = new {{FEATURE}}.{{RECORD}}({{PK_PARAM}}, {{ENTITY_LOWER}});
        await _mediator.Send(command);

        return NoContent();
    }
"#;

const ENDPOINT_PATCH_RECORD: &str = r#"
{{DOCS}}{{AUTH}}    [Consumes("application/json")]
    [Produces("application/json")]
    [HttpPatch("{{{PK_PARAM}}}", Name = "{{ROUTE_NAME}}")]
    public async Task<IActionResult> {{ROUTE_NAME}}({{PK_TYPE}} {{PK_PARAM}}, JsonPatchDocument<{{UPDATE_DTO}}> patchDoc)
    {
        var command = new {{FEATURE}}.{{RECORD}}({{PK_PARAM}}, patchDoc);
        await _mediator.Send(command);

        return NoContent();
    }
"#;

const ENDPOINT_DELETE_RECORD: &str = r#"
{{DOCS}}{{AUTH}}    [Produces("application/json")]
    [HttpDelete("{{{PK_PARAM}}}", Name = "{{ROUTE_NAME}}")]
    public async Task<ActionResult> {{ROUTE_NAME}}({{PK_TYPE}} {{PK_PARAM}})
    {
        var command = new {{FEATURE}}.{{RECORD}}({{PK_PARAM}});
        await _mediator.Send(command);

        return NoContent();
    }
"#;

const ENDPOINT_ADD_LIST: &str = r#"
{{DOCS}}{{AUTH}}    [Consumes("application/json")]
    [Produces("application/json")]
    [HttpPost("batch", Name = "{{ROUTE_NAME}}")]
    public async Task<ActionResult<IEnumerable<{{READ_DTO}}>>> {{ROUTE_NAME}}([FromBody] IEnumerable<{{CREATION_DTO}}> {{ENTITY_LOWER}}ForCreation,
        [FromQuery(Name = "{{BATCH_PARAM}}"), BindRequired] {{BATCH_PROPERTY_TYPE}} {{BATCH_PARAM}})
    {
        var command = new {{FEATURE}}.{{RECORD}}({{ENTITY_LOWER}}ForCreation, {{BATCH_PARAM}});
        var commandResponse = await _mediator.Send(command);

        return Created("{{ROUTE}}/batch", commandResponse);
    }
"#;

// ── Commands and queries ──────────────────────────────────────────────────────

const QUERY_GET_RECORD: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using AutoMapper.QueryableExtensions;
using MediatR;
using Microsoft.EntityFrameworkCore;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}({{PK_TYPE}} {{PK_NAME}}) : IRequest<{{READ_DTO}}>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, {{READ_DTO}}>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;

        public Handler({{DB_CONTEXT}} db, IMapper mapper)
        {
            _db = db;
            _mapper = mapper;
        }

        public async Task<{{READ_DTO}}> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var result = await _db.{{ENTITY_PLURAL}}
                .AsNoTracking()
                .ProjectTo<{{READ_DTO}}>(_mapper.ConfigurationProvider)
                .FirstOrDefaultAsync({{LAMBDA}} => {{LAMBDA}}.{{PK_NAME}} == request.{{PK_NAME}}, cancellationToken);

            return result ?? throw new KeyNotFoundException($"{{ENTITY}} {request.{{PK_NAME}}} was not found.");
        }
    }
}
"#;

const QUERY_GET_LIST: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using AutoMapper.QueryableExtensions;
using MediatR;
using Microsoft.EntityFrameworkCore;
using Sieve.Models;
using Sieve.Services;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}(SieveModel Parameters) : IRequest<List<{{READ_DTO}}>>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, List<{{READ_DTO}}>>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;
        private readonly ISieveProcessor _sieveProcessor;

        public Handler({{DB_CONTEXT}} db, IMapper mapper, ISieveProcessor sieveProcessor)
        {
            _db = db;
            _mapper = mapper;
            _sieveProcessor = sieveProcessor;
        }

        public async Task<List<{{READ_DTO}}>> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var collection = _db.{{ENTITY_PLURAL}}.AsNoTracking();
            var filtered = _sieveProcessor.Apply(request.Parameters, collection);

            return await filtered
                .ProjectTo<{{READ_DTO}}>(_mapper.ConfigurationProvider)
                .ToListAsync(cancellationToken);
        }
    }
}
"#;

const COMMAND_ADD_RECORD: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{ENTITY_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using MediatR;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}({{CREATION_DTO}} {{ENTITY}}ToAdd) : IRequest<{{READ_DTO}}>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, {{READ_DTO}}>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;

        public Handler({{DB_CONTEXT}} db, IMapper mapper)
        {
            _db = db;
            _mapper = mapper;
        }

        public async Task<{{READ_DTO}}> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var {{ENTITY_LOWER}} = _mapper.Map<{{ENTITY}}>(request.{{ENTITY}}ToAdd);
            _db.{{ENTITY_PLURAL}}.Add({{ENTITY_LOWER}});
            await _db.SaveChangesAsync(cancellationToken);

            return _mapper.Map<{{READ_DTO}}>({{ENTITY_LOWER}});
        }
    }
}
"#;

const COMMAND_ADD_LIST: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{ENTITY_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using MediatR;
using Microsoft.EntityFrameworkCore;
using System.Collections.Generic;
using System.Linq;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}(IEnumerable<{{CREATION_DTO}}> {{ENTITY}}ListToAdd, {{BATCH_PROPERTY_TYPE}} {{BATCH_PROPERTY_NAME}}) : IRequest<List<{{READ_DTO}}>>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, List<{{READ_DTO}}>>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;

        public Handler({{DB_CONTEXT}} db, IMapper mapper)
        {
            _db = db;
            _mapper = mapper;
        }

        public async Task<List<{{READ_DTO}}>> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var parentExists = await _db.{{PARENT_PLURAL}}.AnyAsync(p => p.Id == request.{{BATCH_PROPERTY_NAME}}, cancellationToken);
            if (!parentExists)
                throw new KeyNotFoundException($"{{PARENT_ENTITY}} {request.{{BATCH_PROPERTY_NAME}}} was not found.");

            var records = _mapper.Map<List<{{ENTITY}}>>(request.{{ENTITY}}ListToAdd);
            foreach (var record in records)
                record.{{BATCH_PROPERTY_NAME}} = request.{{BATCH_PROPERTY_NAME}};

            _db.{{ENTITY_PLURAL}}.AddRange(records);
            await _db.SaveChangesAsync(cancellationToken);

            return _mapper.Map<List<{{READ_DTO}}>>(records);
        }
    }
}
"#;

const COMMAND_UPDATE_RECORD: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using MediatR;
using Microsoft.EntityFrameworkCore;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}({{PK_TYPE}} {{PK_NAME}}, {{UPDATE_DTO}} {{ENTITY}}ToUpdate) : IRequest<bool>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, bool>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;

        public Handler({{DB_CONTEXT}} db, IMapper mapper)
        {
            _db = db;
            _mapper = mapper;
        }

        public async Task<bool> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var {{ENTITY_LOWER}}ToUpdate = await _db.{{ENTITY_PLURAL}}
                .FirstOrDefaultAsync({{LAMBDA}} => {{LAMBDA}}.{{PK_NAME}} == request.{{PK_NAME}}, cancellationToken)
                ?? throw new KeyNotFoundException($"{{ENTITY}} {request.{{PK_NAME}}} was not found.");

            _mapper.Map(request.{{ENTITY}}ToUpdate, {{ENTITY_LOWER}}ToUpdate);
            await _db.SaveChangesAsync(cancellationToken);

            return true;
        }
    }
}
"#;

const COMMAND_PATCH_RECORD: &str = r#"namespace {{NAMESPACE}};

using {{DTO_NAMESPACE}};
using {{DB_NAMESPACE}};
using AutoMapper;
using MediatR;
using Microsoft.AspNetCore.JsonPatch;
using Microsoft.EntityFrameworkCore;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}({{PK_TYPE}} {{PK_NAME}}, JsonPatchDocument<{{UPDATE_DTO}}> PatchDoc) : IRequest<bool>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, bool>
    {
        private readonly {{DB_CONTEXT}} _db;
        private readonly IMapper _mapper;

        public Handler({{DB_CONTEXT}} db, IMapper mapper)
        {
            _db = db;
            _mapper = mapper;
        }

        public async Task<bool> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var {{ENTITY_LOWER}}ToPatch = await _db.{{ENTITY_PLURAL}}
                .FirstOrDefaultAsync({{LAMBDA}} => {{LAMBDA}}.{{PK_NAME}} == request.{{PK_NAME}}, cancellationToken)
                ?? throw new KeyNotFoundException($"{{ENTITY}} {request.{{PK_NAME}}} was not found.");

            var patched = _mapper.Map<{{UPDATE_DTO}}>({{ENTITY_LOWER}}ToPatch);
            request.PatchDoc.ApplyTo(patched);

            _mapper.Map(patched, {{ENTITY_LOWER}}ToPatch);
            await _db.SaveChangesAsync(cancellationToken);

            return true;
        }
    }
}
"#;

const COMMAND_DELETE_RECORD: &str = r#"namespace {{NAMESPACE}};

using {{DB_NAMESPACE}};
using MediatR;
using Microsoft.EntityFrameworkCore;
using System.Collections.Generic;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}({{PK_TYPE}} {{PK_NAME}}) : IRequest<bool>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, bool>
    {
        private readonly {{DB_CONTEXT}} _db;

        public Handler({{DB_CONTEXT}} db)
        {
            _db = db;
        }

        public async Task<bool> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            var recordToDelete = await _db.{{ENTITY_PLURAL}}
                .FirstOrDefaultAsync({{LAMBDA}} => {{LAMBDA}}.{{PK_NAME}} == request.{{PK_NAME}}, cancellationToken)
                ?? throw new KeyNotFoundException($"{{ENTITY}} {request.{{PK_NAME}}} was not found.");

            _db.{{ENTITY_PLURAL}}.Remove(recordToDelete);
            await _db.SaveChangesAsync(cancellationToken);

            return true;
        }
    }
}
"#;

const AD_HOC_FEATURE: &str = r#"namespace {{NAMESPACE}};

using {{DB_NAMESPACE}};
using MediatR;
using System.Threading;
using System.Threading.Tasks;

public static class {{FEATURE}}
{
    public sealed record {{RECORD}}() : IRequest<bool>;

    public sealed class Handler : IRequestHandler<{{RECORD}}, bool>
    {
        private readonly {{DB_CONTEXT}} _db;

        public Handler({{DB_CONTEXT}} db)
        {
            _db = db;
        }

        public Task<bool> Handle({{RECORD}} request, CancellationToken cancellationToken)
        {
            return Task.FromResult(true);
        }
    }
}
"#;

// ── Tests ─────────────────────────────────────────────────────────────────────

const INTEGRATION_TEST: &str = r#"namespace {{NAMESPACE}};

using {{FAKES_NAMESPACE}};
using {{FEATURE_NAMESPACE}};
using FluentAssertions;
using NUnit.Framework;
using System.Threading.Tasks;
using static TestFixture;

public class {{TEST_CLASS}} : TestBase
{
    [Test]
    public async Task {{FEATURE}}_handles_a_valid_request()
    {
        var fake{{ENTITY}} = new Fake{{ENTITY}}().Generate();
        await InsertAsync(fake{{ENTITY}});

        // send a {{RECORD}} and assert on the response
        fake{{ENTITY}}.Should().NotBeNull();
    }
}
"#;

const FUNCTIONAL_TEST: &str = r#"namespace {{NAMESPACE}};

using {{FAKES_NAMESPACE}};
using {{ROUTES_NAMESPACE}};
using FluentAssertions;
using NUnit.Framework;
using System.Net;
using System.Net.Http;
using System.Threading.Tasks;

public class {{TEST_CLASS}} : TestBase
{
    [Test]
    public async Task {{ROUTE_NAME}}_returns_success()
    {
        var fake{{ENTITY}} = new Fake{{ENTITY}}().Generate();
        await InsertAsync(fake{{ENTITY}});

        var route = ApiRoutes.{{ENTITY_PLURAL}}.{{ROUTE_CONST}}.Replace(ApiRoutes.{{ENTITY_PLURAL}}.{{PK_NAME}}, fake{{ENTITY}}.{{PK_NAME}}.ToString());
        var result = await _client.SendAsync(new HttpRequestMessage(HttpMethod.{{HTTP_METHOD}}, route));

        result.IsSuccessStatusCode.Should().BeTrue();
    }
{{AUTH_TESTS}}}
"#;

const FUNCTIONAL_AUTH_TESTS: &str = r#"
    [Test]
    public async Task {{ROUTE_NAME}}_returns_unauthorized_without_valid_token()
    {
        var result = await _client.SendAsync(new HttpRequestMessage(HttpMethod.{{HTTP_METHOD}}, ApiRoutes.{{ENTITY_PLURAL}}.{{ROUTE_CONST}}));

        result.StatusCode.Should().Be(HttpStatusCode.Unauthorized);
    }

    [Test]
    public async Task {{ROUTE_NAME}}_returns_forbidden_without_{{PERMISSION}}()
    {
        _client.AddAuth();
        var result = await _client.SendAsync(new HttpRequestMessage(HttpMethod.{{HTTP_METHOD}}, ApiRoutes.{{ENTITY_PLURAL}}.{{ROUTE_CONST}}));

        result.StatusCode.Should().Be(HttpStatusCode.Forbidden);
    }
"#;

const FAKE: &str = r#"namespace {{NAMESPACE}};

using AutoBogus;
using {{TARGET_NAMESPACE}};

public sealed class {{FAKE}} : AutoFaker<{{TARGET}}>
{
    public {{FAKE}}()
    {
        // RuleFor(x => x.Property, f => f.Lorem.Word());
    }
}
"#;

// ── Messaging ─────────────────────────────────────────────────────────────────

const CONSUMER: &str = r#"namespace {{NAMESPACE}};

{{DB_USING}}using MassTransit;
using Messages;
using System.Threading.Tasks;

public sealed class {{CONSUMER}} : IConsumer<{{MESSAGE}}>
{
{{DB_MEMBERS}}    public Task Consume(ConsumeContext<{{MESSAGE}}> context)
    {
        return Task.CompletedTask;
    }
}
"#;

const CONSUMER_DB_MEMBERS: &str = r#"    private readonly {{DB_CONTEXT}} _db;

    public {{CONSUMER}}({{DB_CONTEXT}} db)
    {
        _db = db;
    }

"#;

const TEST_FIXTURE: &str = r#"namespace {{NAMESPACE}};

using {{DB_NAMESPACE}};
using MassTransit;
using MassTransit.Testing;
using Microsoft.Extensions.DependencyInjection;
using NUnit.Framework;
using System.Threading.Tasks;

[SetUpFixture]
public class TestFixture
{
    public static IServiceScopeFactory ScopeFactory { get; private set; }
    public static InMemoryTestHarness Harness { get; private set; }

    [OneTimeSetUp]
    public async Task RunBeforeAnyTests()
    {
        var services = new ServiceCollection();
        services.AddDbContext<{{DB_CONTEXT}}>();

        services.AddMassTransitInMemoryTestHarness(cfg =>
        {
            // Consumer Registration -- Do Not Delete Comment
        });

        var provider = services.BuildServiceProvider();
        ScopeFactory = provider.GetRequiredService<IServiceScopeFactory>();
        Harness = provider.GetRequiredService<InMemoryTestHarness>();
        await Harness.Start();
    }

    [OneTimeTearDown]
    public async Task RunAfterAnyTests()
    {
        await Harness.Stop();
    }
}
"#;

const CONSUMER_REGISTRATION: &str = "            cfg.AddConsumer<{{CONSUMER}}>();";

const USING_DIRECTIVE: &str = "using {{NAMESPACE}};\n";

#[cfg(test)]
mod tests {
    use super::*;
    use mortise_core::domain::{MarkerToken, RenderContext, template::substitute};

    #[test]
    fn every_template_has_a_body() {
        for &id in TemplateId::ALL {
            assert!(!builtin_body(id).trim().is_empty(), "{id} has no body");
        }
    }

    #[test]
    fn patch_targets_carry_their_markers() {
        let cases = [
            (TemplateId::Entity, MarkerToken::PropertyAddOn),
            (TemplateId::ReadDto, MarkerToken::PropertyAddOn),
            (TemplateId::ManipulationDto, MarkerToken::PropertyAddOn),
            (TemplateId::Controller, MarkerToken::ControllerEndpoint),
            (TemplateId::ApiRoutes, MarkerToken::ApiRoutes),
            (TemplateId::TestFixture, MarkerToken::ConsumerRegistration),
            (TemplateId::TestFixture, MarkerToken::MessagingUsing),
        ];
        for (id, marker) in cases {
            let matching = builtin_body(id)
                .lines()
                .filter(|line| line.contains(marker.as_str()))
                .count();
            assert_eq!(matching, 1, "{id} should contain '{marker}' exactly once");
        }
    }

    #[test]
    fn route_parameters_keep_their_braces() {
        let ctx = RenderContext::new()
            .with("ENTITY_PLURAL", "Widgets")
            .with("PK_NAME", "Id")
            .with("PK_PARAM", "id")
            .with("ROUTE", "widgets");
        let text = substitute(TemplateId::EntityRoutes, ENTITY_ROUTES, &ctx).unwrap();

        assert!(text.contains(r#"public const string Id = "{id}";"#));
        assert!(text.contains(r#"GetRecord = Base + "/widgets/{id}";"#));
    }

    #[test]
    fn auth_attribute_is_a_whole_line() {
        let ctx = RenderContext::new().with("PERMISSION", "CanGetWidget");
        let text = substitute(TemplateId::AuthAttributes, AUTH_ATTRIBUTES, &ctx).unwrap();
        assert_eq!(text, "    [Authorize(Policy = \"CanGetWidget\")]\n");
    }
}
